//! Error types for DOCX template operations

use thiserror::Error;

/// Low-level errors while reading or writing a DOCX package
#[derive(Debug, Error)]
pub enum DocxError {
    /// IO error (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML parsing error
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    /// Invalid DOCX structure
    #[error("Invalid DOCX structure: {0}")]
    InvalidStructure(String),

    /// Missing required part
    #[error("Missing required part: {0}")]
    MissingPart(String),

    /// Relationship error
    #[error("Relationship error: {0}")]
    RelationshipError(String),

    /// UTF-8 encoding error
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl From<quick_xml::Error> for DocxError {
    fn from(err: quick_xml::Error) -> Self {
        DocxError::XmlParse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for DocxError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        DocxError::XmlParse(format!("Attribute error: {}", err))
    }
}

/// Result type for DOCX package operations
pub type DocxResult<T> = std::result::Result<T, DocxError>;

/// Errors surfaced to callers of the template engine
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template could not be read as a DOCX package
    #[error("Failed to load template: {0}")]
    Load(#[source] DocxError),

    /// The rendered document could not be serialized or written
    #[error("Failed to save document: {0}")]
    Save(#[source] DocxError),
}

impl TemplateError {
    pub fn is_load(&self) -> bool {
        matches!(self, TemplateError::Load(_))
    }

    pub fn is_save(&self) -> bool {
        matches!(self, TemplateError::Save(_))
    }
}

/// Result type for template engine operations
pub type TemplateResult<T> = std::result::Result<T, TemplateError>;
