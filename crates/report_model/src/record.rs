//! Weekly report record

use crate::{ModelError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used for report dates everywhere (ISO-8601 calendar date)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single weekly report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
    /// Author name
    pub name: Option<String>,
    /// Report date
    pub date: NaiveDate,
    /// What was done this week
    pub summary: Option<String>,
    /// What is planned next week
    pub plan: Option<String>,
}

impl ReportRecord {
    /// Create a record for the given date with no other fields set
    pub fn new(date: NaiveDate) -> Self {
        Self { name: None, date, summary: None, plan: None }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = Some(plan.into());
        self
    }

    /// Trimmed author name, or `None` when missing or blank
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }

    /// Report date as `YYYY-MM-DD`
    pub fn iso_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// Normalize user input: names are trimmed and blank names dropped
    pub fn normalized(mut self) -> Self {
        self.name = self.display_name().map(str::to_string);
        self
    }
}

/// Parse a `YYYY-MM-DD` date string
pub fn parse_report_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| ModelError::InvalidDate(input.to_string()))
}
