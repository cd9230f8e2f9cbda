//! Report export
//!
//! Fills the stored template with one report and writes the result under
//! a file name built from the configured pattern.

use crate::config::ExportConfig;
use crate::repository::ReportRepository;
use crate::template_store::TemplateStore;
use crate::Result;
use docx_template::{render_to_file, RenderStats};
use report_model::{FilenameValues, PlaceholderContext, UNNAMED};
use std::path::{Path, PathBuf};

/// A document written by [`Exporter::export`]
#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub stats: RenderStats,
}

/// Borrowed view over the stores needed for an export
pub struct Exporter<'a> {
    reports: &'a ReportRepository,
    templates: &'a TemplateStore,
    config: &'a ExportConfig,
}

impl<'a> Exporter<'a> {
    pub fn new(reports: &'a ReportRepository, templates: &'a TemplateStore, config: &'a ExportConfig) -> Self {
        Self {
            reports,
            templates,
            config,
        }
    }

    /// Render report `report_id` into `out_dir`
    pub fn export(&self, report_id: u64, out_dir: &Path) -> Result<ExportedFile> {
        let report = self.reports.get(report_id)?;
        let template = self.templates.read()?;

        let context = PlaceholderContext::from_record(&report.record);
        let file_name = sanitize_file_name(
            &self
                .config
                .filename_pattern
                .format(&FilenameValues::from_record(&report.record)),
        );
        let path = out_dir.join(&file_name);

        let output = render_to_file(&template, &context, &path)?;

        tracing::info!(
            report_id,
            path = %path.display(),
            rewritten = output.stats.rewritten.total(),
            "Exported report"
        );

        Ok(ExportedFile {
            path,
            file_name,
            stats: output.stats,
        })
    }
}

/// Keep the file name inside the output directory: path separators become
/// `_`, and a name that is empty or only dots becomes [`UNNAMED`]
fn sanitize_file_name(name: &str) -> String {
    if name.chars().all(|c| c == '.') {
        return UNNAMED.to_string();
    }
    name.chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("2024-05-01_张三_周报.docx"), "2024-05-01_张三_周报.docx");
        assert_eq!(sanitize_file_name("../a/b\\c.docx"), ".._a_b_c.docx");
        assert_eq!(sanitize_file_name(".."), UNNAMED);
        assert_eq!(sanitize_file_name("."), UNNAMED);
        assert_eq!(sanitize_file_name(""), UNNAMED);
        assert_eq!(sanitize_file_name("..docx"), "..docx");
    }
}
