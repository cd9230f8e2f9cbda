//! Error types for report model operations

use thiserror::Error;

/// Errors raised while building report values from user input
#[derive(Debug, Error)]
pub enum ModelError {
    /// Date text did not match `YYYY-MM-DD`
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Filename pattern problem
    #[error("Filename pattern error: {0}")]
    Format(#[from] FormatError),
}

/// Errors in an export filename pattern
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// The pattern is empty or only whitespace
    #[error("Filename pattern is empty")]
    EmptyPattern,
}

/// Result type for report model operations
pub type Result<T> = std::result::Result<T, ModelError>;
