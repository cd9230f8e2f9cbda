//! DOCX Template - Placeholder substitution for weekly report templates
//!
//! A template is an ordinary Word document containing `{{NAME}}`,
//! `{{DATE}}`, `{{SUMMARY}}` and `{{PLAN}}` tokens. Rendering replaces
//! those tokens in every paragraph of the document body (including table
//! cells, at any nesting depth), every header and every footer.
//!
//! ## Structure
//!
//! - `reader` / `relationships` - ZIP access and relationship resolution
//! - `package` - locating the main document, header and footer parts
//! - `scanner` - streaming scan of a part for region paragraphs and their text
//! - `paragraph` - token replacement and single-run paragraph rewriting
//! - `writer` - re-zipping with untouched entries raw-copied
//! - `engine` / `api` - the render and inspect entry points
//!
//! Paragraphs whose text does not change are left byte-for-byte as they
//! were in the template. A changed paragraph keeps its paragraph
//! properties but its runs are collapsed into one unformatted run.

mod api;
mod engine;
mod error;
mod package;
mod paragraph;
mod reader;
mod relationships;
mod scanner;
mod writer;

pub use api::{inspect, render, render_to_file, render_with_stats};
pub use engine::{
    ParagraphInfo, RegionCounts, RegionSummary, RenderOutput, RenderStats, TemplateEngine,
    TemplateSummary,
};
pub use error::{DocxError, DocxResult, TemplateError, TemplateResult};
pub use package::RegionKind;
pub use paragraph::substitute;

/// Relationship kinds followed when discovering text regions.
///
/// Matched against the last segment of a relationship's type URI, so both
/// transitional and strict OOXML namespaces are accepted.
pub mod relationship_kinds {
    pub const OFFICE_DOCUMENT: &str = "officeDocument";
    pub const HEADER: &str = "header";
    pub const FOOTER: &str = "footer";
}
