//! Template substitution engine
//!
//! Coordinates one render: open the package, scan each region part,
//! substitute placeholders paragraph by paragraph, splice the rewritten
//! paragraphs back into their parts, and re-zip.

use crate::error::{TemplateError, TemplateResult};
use crate::package::{DocumentPackage, RegionKind};
use crate::paragraph::{render_paragraph, substitute};
use crate::scanner::{scan_paragraphs, ScannedParagraph};
use report_model::{PlaceholderContext, PlaceholderKey};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

/// Per-region paragraph counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionCounts {
    pub body: usize,
    pub header: usize,
    pub footer: usize,
}

impl RegionCounts {
    fn bump(&mut self, kind: RegionKind) {
        match kind {
            RegionKind::Body => self.body += 1,
            RegionKind::Header => self.header += 1,
            RegionKind::Footer => self.footer += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.body + self.header + self.footer
    }

    pub fn get(&self, kind: RegionKind) -> usize {
        match kind {
            RegionKind::Body => self.body,
            RegionKind::Header => self.header,
            RegionKind::Footer => self.footer,
        }
    }
}

/// What a render changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Region paragraphs examined
    pub scanned: RegionCounts,
    /// Paragraphs whose text changed and were rewritten
    pub rewritten: RegionCounts,
    /// Rewritten paragraphs that sit inside a table cell
    pub rewritten_in_tables: usize,
    /// Package parts whose XML was replaced
    pub parts_rewritten: Vec<String>,
}

/// Rendered document plus statistics
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub bytes: Vec<u8>,
    pub stats: RenderStats,
}

/// One region paragraph as seen by [`TemplateEngine::inspect`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphInfo {
    pub text: String,
    pub table_depth: usize,
    /// Recognized placeholder tokens present in the text
    pub placeholders: Vec<PlaceholderKey>,
}

/// Text regions of a template part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSummary {
    pub part: String,
    pub kind: RegionKind,
    pub paragraphs: Vec<ParagraphInfo>,
}

/// Structure and placeholder usage of a template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSummary {
    pub regions: Vec<RegionSummary>,
}

impl TemplateSummary {
    /// Every recognized placeholder used anywhere in the template
    pub fn placeholders(&self) -> BTreeSet<PlaceholderKey> {
        self.regions
            .iter()
            .flat_map(|r| r.paragraphs.iter())
            .flat_map(|p| p.placeholders.iter().copied())
            .collect()
    }

    pub fn has_placeholders(&self) -> bool {
        self.regions
            .iter()
            .flat_map(|r| r.paragraphs.iter())
            .any(|p| !p.placeholders.is_empty())
    }

    /// Paragraph texts of all regions of one kind, in scan order
    pub fn texts(&self, kind: RegionKind) -> Vec<&str> {
        self.regions
            .iter()
            .filter(|r| r.kind == kind)
            .flat_map(|r| r.paragraphs.iter())
            .map(|p| p.text.as_str())
            .collect()
    }

    /// Placeholder keys used in regions of one kind
    pub fn placeholders_in(&self, kind: RegionKind) -> BTreeSet<PlaceholderKey> {
        self.regions
            .iter()
            .filter(|r| r.kind == kind)
            .flat_map(|r| r.paragraphs.iter())
            .flat_map(|p| p.placeholders.iter().copied())
            .collect()
    }
}

/// Stateless engine; every call works on its own copy of the package
pub struct TemplateEngine;

impl TemplateEngine {
    /// Render a template with the given context
    pub fn render(template: &[u8], context: &PlaceholderContext) -> TemplateResult<RenderOutput> {
        let mut package = DocumentPackage::open(template).map_err(TemplateError::Load)?;
        let mut stats = RenderStats::default();
        let mut rewritten = BTreeMap::new();

        for region in package.regions().to_vec() {
            let xml = package.read_part(&region.name).map_err(TemplateError::Load)?;
            let paragraphs = scan_paragraphs(&xml).map_err(TemplateError::Load)?;

            let mut edits = Vec::new();
            for paragraph in &paragraphs {
                stats.scanned.bump(region.kind);

                if let Some(new_text) = substitute(&paragraph.text, context) {
                    let rendered = render_paragraph(&xml, paragraph, &new_text).map_err(TemplateError::Save)?;
                    edits.push((paragraph.span.clone(), rendered));
                    stats.rewritten.bump(region.kind);
                    if paragraph.in_table() {
                        stats.rewritten_in_tables += 1;
                    }
                }
            }

            tracing::debug!(
                part = %region.name,
                region = %region.kind,
                paragraphs = paragraphs.len(),
                rewritten = edits.len(),
                "Scanned template region"
            );

            if !edits.is_empty() {
                rewritten.insert(region.name.clone(), splice(&xml, &edits));
                stats.parts_rewritten.push(region.name);
            }
        }

        let bytes = package.save(&rewritten).map_err(TemplateError::Save)?;

        Ok(RenderOutput { bytes, stats })
    }

    /// Scan a template without rendering it
    pub fn inspect(template: &[u8]) -> TemplateResult<TemplateSummary> {
        let mut package = DocumentPackage::open(template).map_err(TemplateError::Load)?;
        let mut summary = TemplateSummary::default();

        for region in package.regions().to_vec() {
            let xml = package.read_part(&region.name).map_err(TemplateError::Load)?;
            let paragraphs = scan_paragraphs(&xml)
                .map_err(TemplateError::Load)?
                .into_iter()
                .map(paragraph_info)
                .collect();

            summary.regions.push(RegionSummary {
                part: region.name,
                kind: region.kind,
                paragraphs,
            });
        }

        Ok(summary)
    }
}

fn paragraph_info(paragraph: ScannedParagraph) -> ParagraphInfo {
    let placeholders = PlaceholderKey::ALL
        .into_iter()
        .filter(|key| paragraph.text.contains(key.token()))
        .collect();

    ParagraphInfo {
        text: paragraph.text,
        table_depth: paragraph.table_depth,
        placeholders,
    }
}

/// Replace non-overlapping, ordered byte ranges of `xml`
fn splice(xml: &str, edits: &[(Range<usize>, String)]) -> String {
    let mut out = String::with_capacity(xml.len());
    let mut cursor = 0;

    for (span, replacement) in edits {
        out.push_str(&xml[cursor..span.start]);
        out.push_str(replacement);
        cursor = span.end;
    }
    out.push_str(&xml[cursor..]);
    out
}
