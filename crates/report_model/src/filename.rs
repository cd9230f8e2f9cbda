//! Export file naming
//!
//! Exported documents are named from a simple pattern containing `{DATE}`
//! and `{NAME}`. This is plain string formatting, unrelated to the
//! `{{KEY}}` tokens substituted inside the document itself.

use crate::record::ReportRecord;
use crate::FormatError;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Pattern used when none has been configured
pub const DEFAULT_FILENAME_PATTERN: &str = "{DATE}_{NAME}_周报.docx";

/// Name used in file names for reports without an author
pub const UNNAMED: &str = "未命名";

const NAME_TOKEN: &str = "{NAME}";
const DATE_TOKEN: &str = "{DATE}";

fn brace_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{[^{}]*\}").expect("valid token regex"))
}

/// Values available to a filename pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameValues {
    pub name: String,
    pub date: String,
}

impl FilenameValues {
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self { name: name.into(), date: date.into() }
    }

    /// Values for a report; a missing name becomes [`UNNAMED`]
    pub fn from_record(record: &ReportRecord) -> Self {
        Self::new(record.display_name().unwrap_or(UNNAMED), record.iso_date())
    }
}

/// A filename pattern with `{DATE}` and `{NAME}` tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilenamePattern(String);

impl Default for FilenamePattern {
    fn default() -> Self {
        Self(DEFAULT_FILENAME_PATTERN.to_string())
    }
}

impl FilenamePattern {
    /// Parse a user supplied pattern (trimmed, must not be blank)
    pub fn parse(pattern: &str) -> Result<Self, FormatError> {
        let trimmed = pattern.trim();
        if trimmed.is_empty() {
            return Err(FormatError::EmptyPattern);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitute `{NAME}` and `{DATE}` in a single pass.
    ///
    /// Unknown `{...}` tokens are left as literal text, and substituted
    /// values are never scanned again.
    pub fn format(&self, values: &FilenameValues) -> String {
        let mut out = String::with_capacity(self.0.len() + values.name.len() + values.date.len());
        let mut rest = self.0.as_str();

        while let Some(pos) = rest.find('{') {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];
            if let Some(after) = tail.strip_prefix(NAME_TOKEN) {
                out.push_str(&values.name);
                rest = after;
            } else if let Some(after) = tail.strip_prefix(DATE_TOKEN) {
                out.push_str(&values.date);
                rest = after;
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);
        out
    }

    /// Brace tokens in the pattern other than `{NAME}` and `{DATE}`
    pub fn unknown_tokens(&self) -> Vec<String> {
        brace_token_regex()
            .find_iter(&self.0)
            .map(|m| m.as_str())
            .filter(|t| *t != NAME_TOKEN && *t != DATE_TOKEN)
            .map(str::to_string)
            .collect()
    }
}

impl fmt::Display for FilenamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
