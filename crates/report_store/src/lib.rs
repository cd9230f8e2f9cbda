//! Report Store - Persistence and export for weekly reports
//!
//! This crate handles everything that touches the data directory:
//! the report repository (`reports.json`), export settings
//! (`settings.json`), the uploaded template
//! (`weekly_report_template.docx`), and exporting a report through the
//! template into a named `.docx` file.

mod config;
mod error;
mod exporter;
mod file_io;
mod repository;
mod template_store;

pub use config::{ConfigManager, ExportConfig, SETTINGS_FILE};
pub use error::{Result, StoreError};
pub use exporter::{ExportedFile, Exporter};
pub use file_io::{write_atomic, write_json_atomic};
pub use repository::{ReportRepository, StoredReport, REPORTS_FILE};
pub use template_store::{TemplateStore, TEMPLATE_FILE};
