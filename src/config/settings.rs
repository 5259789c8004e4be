//! User settings for flag-audit
//!
//! Manages display and query preferences: default page size, timestamp
//! format, diff context, and default sort order.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::AuditPaths;
use crate::error::AuditError;
use crate::query::SortOrder;

/// User settings for flag-audit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Records per page when a command doesn't specify one
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Timestamp format preference (strftime format, UTC)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Unchanged lines shown around each change in the changes tab
    #[serde(default = "default_diff_context_lines")]
    pub diff_context_lines: usize,

    /// Sort order when a command doesn't specify one
    #[serde(default)]
    pub default_order: SortOrder,
}

fn default_schema_version() -> u32 {
    1
}

fn default_page_size() -> usize {
    20
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

fn default_diff_context_lines() -> usize {
    3
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            page_size: default_page_size(),
            date_format: default_date_format(),
            diff_context_lines: default_diff_context_lines(),
            default_order: SortOrder::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &AuditPaths) -> Result<Self, AuditError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| AuditError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| AuditError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), AuditError> {
        if self.page_size == 0 {
            return Err(AuditError::Config(
                "page_size must be greater than zero".into(),
            ));
        }

        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(AuditError::Config(format!(
                "date_format is not a valid strftime pattern: {}",
                self.date_format
            )));
        }

        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AuditPaths) -> Result<(), AuditError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| AuditError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| AuditError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
