//! Report Model - Weekly report values shared across the workspace
//!
//! This crate holds the plain value types that flow between the report
//! repository and the DOCX template engine:
//!
//! - [`ReportRecord`] - one weekly report (name, date, summary, plan)
//! - [`PlaceholderContext`] - the four `{{KEY}}` substitution values derived from a record
//! - [`FilenamePattern`] - the `{DATE}` / `{NAME}` pattern used to name exported files
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use report_model::{FilenamePattern, FilenameValues, PlaceholderContext, PlaceholderKey, ReportRecord};
//!
//! let record = ReportRecord::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
//!     .with_name("张三");
//!
//! let context = PlaceholderContext::from_record(&record);
//! assert_eq!(context.get(PlaceholderKey::Date), "2024-05-01");
//!
//! let pattern = FilenamePattern::default();
//! let file_name = pattern.format(&FilenameValues::from_record(&record));
//! assert_eq!(file_name, "2024-05-01_张三_周报.docx");
//! ```

mod error;
mod filename;
mod placeholder;
mod record;

pub use error::{FormatError, ModelError, Result};
pub use filename::{FilenamePattern, FilenameValues, DEFAULT_FILENAME_PATTERN, UNNAMED};
pub use placeholder::{PlaceholderContext, PlaceholderKey};
pub use record::{parse_report_date, ReportRecord, DATE_FORMAT};
