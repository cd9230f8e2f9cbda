//! Weekly report repository
//!
//! Reports live in a single `reports.json` file in the data directory.
//! The whole file is loaded on open and rewritten atomically after every
//! mutation.

use crate::file_io::write_json_atomic;
use crate::{Result, StoreError};
use chrono::{DateTime, Utc};
use report_model::ReportRecord;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the report store inside the data directory
pub const REPORTS_FILE: &str = "reports.json";

/// A report together with its identity and bookkeeping timestamps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredReport {
    pub id: u64,
    #[serde(flatten)]
    pub record: ReportRecord,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ReportsFile {
    next_id: u64,
    reports: Vec<StoredReport>,
}

impl Default for ReportsFile {
    fn default() -> Self {
        Self {
            next_id: 1,
            reports: Vec::new(),
        }
    }
}

/// JSON-backed store of weekly reports
pub struct ReportRepository {
    path: PathBuf,
    data: ReportsFile,
}

impl ReportRepository {
    /// Open the repository in `data_dir`; a missing file is an empty store
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let path = data_dir.as_ref().join(REPORTS_FILE);

        let data = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let mut data: ReportsFile = serde_json::from_str(&content)?;
            let max_id = data.reports.iter().map(|r| r.id).max().unwrap_or(0);
            data.next_id = data.next_id.max(max_id + 1);
            data
        } else {
            ReportsFile::default()
        };

        tracing::debug!(path = %path.display(), reports = data.reports.len(), "Opened report repository");

        Ok(Self { path, data })
    }

    /// Path to the reports file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store a new report and return its id
    pub fn create(&mut self, record: ReportRecord) -> Result<u64> {
        let id = self.data.next_id;
        let now = Utc::now();

        self.data.reports.push(StoredReport {
            id,
            record: record.normalized(),
            created_at: now,
            updated_at: now,
        });
        self.data.next_id += 1;
        self.save()?;

        tracing::info!(id, "Created report");
        Ok(id)
    }

    pub fn get(&self, id: u64) -> Result<&StoredReport> {
        self.data
            .reports
            .iter()
            .find(|r| r.id == id)
            .ok_or(StoreError::ReportNotFound(id))
    }

    /// Replace a report's fields, keeping its id and creation time
    pub fn update(&mut self, id: u64, record: ReportRecord) -> Result<&StoredReport> {
        let index = self.index_of(id)?;
        {
            let report = &mut self.data.reports[index];
            report.record = record.normalized();
            report.updated_at = Utc::now();
        }
        self.save()?;

        tracing::info!(id, "Updated report");
        Ok(&self.data.reports[index])
    }

    /// Remove a report and return it
    pub fn delete(&mut self, id: u64) -> Result<StoredReport> {
        let index = self.index_of(id)?;
        let removed = self.data.reports.remove(index);
        self.save()?;

        tracing::info!(id, "Deleted report");
        Ok(removed)
    }

    /// All reports, newest date first; ties broken by newest id
    pub fn list(&self) -> Vec<&StoredReport> {
        let mut reports: Vec<_> = self.data.reports.iter().collect();
        reports.sort_by(|a, b| b.record.date.cmp(&a.record.date).then(b.id.cmp(&a.id)));
        reports
    }

    pub fn len(&self) -> usize {
        self.data.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.reports.is_empty()
    }

    /// Name on the most recently created report, used to prefill new ones
    pub fn last_name(&self) -> Option<&str> {
        self.data
            .reports
            .iter()
            .max_by_key(|r| r.id)
            .and_then(|r| r.record.display_name())
    }

    fn index_of(&self, id: u64) -> Result<usize> {
        self.data
            .reports
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::ReportNotFound(id))
    }

    fn save(&self) -> Result<()> {
        write_json_atomic(&self.path, &self.data)
    }
}
