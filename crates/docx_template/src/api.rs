//! Public API for template rendering
//!
//! This module provides the main entry points for filling a DOCX template.

use crate::engine::{RenderOutput, TemplateEngine, TemplateSummary};
use crate::error::{DocxError, TemplateError, TemplateResult};
use report_model::PlaceholderContext;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Fill a template's placeholders and return the new document bytes
///
/// # Arguments
///
/// * `template` - The DOCX template content as bytes
/// * `context` - Values for `{{NAME}}`, `{{DATE}}`, `{{SUMMARY}}` and `{{PLAN}}`
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - The rendered DOCX
/// * `Err(TemplateError::Load)` - If the template is not a readable DOCX
/// * `Err(TemplateError::Save)` - If the output package cannot be written
///
/// # Example
///
/// ```ignore
/// use docx_template::render;
/// use report_model::{PlaceholderContext, PlaceholderKey};
///
/// let template = std::fs::read("template.docx")?;
/// let context = PlaceholderContext::new().with(PlaceholderKey::Name, "张三");
/// std::fs::write("report.docx", render(&template, &context)?)?;
/// ```
pub fn render(template: &[u8], context: &PlaceholderContext) -> TemplateResult<Vec<u8>> {
    Ok(TemplateEngine::render(template, context)?.bytes)
}

/// Like [`render`], also reporting which paragraphs and parts changed
pub fn render_with_stats(
    template: &[u8],
    context: &PlaceholderContext,
) -> TemplateResult<RenderOutput> {
    TemplateEngine::render(template, context)
}

/// Describe a template's text regions and the placeholders they use
///
/// # Example
///
/// ```ignore
/// use docx_template::inspect;
///
/// let summary = inspect(&std::fs::read("template.docx")?)?;
/// if !summary.has_placeholders() {
///     println!("template contains no placeholders");
/// }
/// ```
pub fn inspect(template: &[u8]) -> TemplateResult<TemplateSummary> {
    TemplateEngine::inspect(template)
}

/// Render a template and write the result to `path`
///
/// The document is rendered in memory first and then written through a
/// temporary file in the destination directory, so a failed render never
/// leaves a partial file at `path`.
pub fn render_to_file(
    template: &[u8],
    context: &PlaceholderContext,
    path: &Path,
) -> TemplateResult<RenderOutput> {
    let output = TemplateEngine::render(template, context)?;

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.exists() {
        std::fs::create_dir_all(parent).map_err(|e| TemplateError::Save(DocxError::Io(e)))?;
    }

    let mut file = NamedTempFile::new_in(parent).map_err(|e| TemplateError::Save(DocxError::Io(e)))?;
    file.write_all(&output.bytes)
        .and_then(|_| file.flush())
        .map_err(|e| TemplateError::Save(DocxError::Io(e)))?;
    file.persist(path)
        .map_err(|e| TemplateError::Save(DocxError::Io(e.error)))?;

    tracing::info!(path = %path.display(), bytes = output.bytes.len(), "Wrote rendered document");

    Ok(output)
}
