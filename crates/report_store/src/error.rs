//! Error types for storage operations

use docx_template::TemplateError;
use report_model::FormatError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Report not found: {0}")]
    ReportNotFound(u64),

    #[error("No template uploaded yet")]
    NoTemplate,

    #[error("Unsupported template file: {0} (only .docx is accepted)")]
    UnsupportedTemplate(String),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Invalid filename pattern: {0}")]
    Format(#[from] FormatError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
