//! Stored report template
//!
//! One template per data directory, kept at a fixed path. Uploads are
//! validated before they replace the current template.

use crate::file_io::write_atomic;
use crate::{Result, StoreError};
use docx_template::{inspect, TemplateSummary};
use std::path::{Path, PathBuf};

/// File name of the stored template inside the data directory
pub const TEMPLATE_FILE: &str = "weekly_report_template.docx";

const TEMPLATE_EXTENSION: &str = "docx";

/// Access to the uploaded template
pub struct TemplateStore {
    path: PathBuf,
}

impl TemplateStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(TEMPLATE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_template(&self) -> bool {
        self.path.is_file()
    }

    /// Replace the stored template.
    ///
    /// Only `.docx` files are accepted, and the bytes must open as a
    /// template; on any failure the current template is left in place.
    pub fn upload(&self, file_name: &str, bytes: &[u8]) -> Result<TemplateSummary> {
        let is_docx = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(TEMPLATE_EXTENSION));
        if !is_docx {
            return Err(StoreError::UnsupportedTemplate(file_name.to_string()));
        }

        let summary = inspect(bytes)?;
        if !summary.has_placeholders() {
            tracing::warn!(file_name, "Uploaded template contains no placeholders");
        }

        write_atomic(&self.path, bytes)?;
        tracing::info!(
            file_name,
            bytes = bytes.len(),
            placeholders = summary.placeholders().len(),
            "Stored template"
        );

        Ok(summary)
    }

    /// Read a private copy of the stored template
    pub fn read(&self) -> Result<Vec<u8>> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NoTemplate),
            Err(e) => Err(e.into()),
        }
    }

    /// Describe the stored template
    pub fn summary(&self) -> Result<TemplateSummary> {
        Ok(inspect(&self.read()?)?)
    }
}
