//! Placeholder keys and substitution contexts for DOCX templates

use crate::record::ReportRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A recognized template placeholder key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlaceholderKey {
    Name,
    Date,
    Summary,
    Plan,
}

impl PlaceholderKey {
    /// All keys in substitution order
    pub const ALL: [PlaceholderKey; 4] = [
        PlaceholderKey::Name,
        PlaceholderKey::Date,
        PlaceholderKey::Summary,
        PlaceholderKey::Plan,
    ];

    /// The bare key as written inside a token (e.g. `NAME`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "NAME",
            Self::Date => "DATE",
            Self::Summary => "SUMMARY",
            Self::Plan => "PLAN",
        }
    }

    /// The full token as it appears in a template (e.g. `{{NAME}}`)
    pub fn token(&self) -> &'static str {
        match self {
            Self::Name => "{{NAME}}",
            Self::Date => "{{DATE}}",
            Self::Summary => "{{SUMMARY}}",
            Self::Plan => "{{PLAN}}",
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::Name => 0,
            Self::Date => 1,
            Self::Summary => 2,
            Self::Plan => 3,
        }
    }
}

impl fmt::Display for PlaceholderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Substitution values for every [`PlaceholderKey`].
///
/// All four keys always have a value; a fresh context maps each to an
/// empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderContext {
    values: [String; 4],
}

impl PlaceholderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the context from a report: dates as `YYYY-MM-DD`, missing
    /// optional fields as empty strings
    pub fn from_record(record: &ReportRecord) -> Self {
        Self::new()
            .with(PlaceholderKey::Name, record.name.clone().unwrap_or_default())
            .with(PlaceholderKey::Date, record.iso_date())
            .with(PlaceholderKey::Summary, record.summary.clone().unwrap_or_default())
            .with(PlaceholderKey::Plan, record.plan.clone().unwrap_or_default())
    }

    pub fn with(mut self, key: PlaceholderKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: PlaceholderKey, value: impl Into<String>) {
        self.values[key.index()] = value.into();
    }

    pub fn get(&self, key: PlaceholderKey) -> &str {
        &self.values[key.index()]
    }

    /// Iterate `(key, value)` pairs in substitution order
    pub fn iter(&self) -> impl Iterator<Item = (PlaceholderKey, &str)> + '_ {
        PlaceholderKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}
