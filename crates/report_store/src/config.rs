//! Export settings management
//!
//! Settings are kept in `settings.json` in the data directory. A missing
//! or unreadable file is never fatal: defaults are used instead.

use crate::file_io::write_json_atomic;
use crate::Result;
use report_model::{FilenamePattern, FormatError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the settings file inside the data directory
pub const SETTINGS_FILE: &str = "settings.json";

/// Settings that control document export
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportConfig {
    /// Pattern for exported file names, e.g. `{DATE}_{NAME}_周报.docx`
    #[serde(default)]
    pub filename_pattern: FilenamePattern,
}

impl ExportConfig {
    /// Replace a blank pattern (hand-edited settings) with the default
    fn sanitized(mut self) -> Self {
        if FilenamePattern::parse(self.filename_pattern.as_str()).is_err() {
            self.filename_pattern = FilenamePattern::default();
        }
        self
    }
}

/// Loads, caches and saves [`ExportConfig`]
pub struct ConfigManager {
    /// Path to the settings file
    settings_path: PathBuf,
    /// Current settings (cached)
    current: ExportConfig,
}

impl ConfigManager {
    /// Create a manager for the given data directory; call [`load`](Self::load) to read the file
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            settings_path: data_dir.as_ref().join(SETTINGS_FILE),
            current: ExportConfig::default(),
        }
    }

    /// Create a manager and load its settings
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let mut manager = Self::new(data_dir);
        manager.load()?;
        Ok(manager)
    }

    /// Get the path to the settings file
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Load settings from disk, or use defaults if the file is missing or invalid
    pub fn load(&mut self) -> Result<&ExportConfig> {
        if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            match serde_json::from_str::<ExportConfig>(&content) {
                Ok(config) => {
                    self.current = config.sanitized();
                }
                Err(e) => {
                    tracing::warn!("Failed to parse settings file, using defaults: {}", e);
                    self.current = ExportConfig::default();
                }
            }
        } else {
            self.current = ExportConfig::default();
        }
        Ok(&self.current)
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<()> {
        write_json_atomic(&self.settings_path, &self.current)
    }

    /// Get current settings
    pub fn get(&self) -> &ExportConfig {
        &self.current
    }

    /// Set the filename pattern and save; a blank pattern restores the default
    pub fn set_filename_pattern(&mut self, pattern: &str) -> Result<&ExportConfig> {
        let pattern = match FilenamePattern::parse(pattern) {
            Ok(pattern) => pattern,
            Err(FormatError::EmptyPattern) => FilenamePattern::default(),
        };

        let unknown = pattern.unknown_tokens();
        if !unknown.is_empty() {
            tracing::warn!(pattern = %pattern, ?unknown, "Filename pattern contains unknown tokens");
        }

        self.current.filename_pattern = pattern;
        self.save()?;
        tracing::info!(pattern = %self.current.filename_pattern, "Updated filename pattern");
        Ok(&self.current)
    }

    /// Reset settings to defaults and save
    pub fn reset(&mut self) -> Result<&ExportConfig> {
        self.current = ExportConfig::default();
        self.save()?;
        Ok(&self.current)
    }
}
