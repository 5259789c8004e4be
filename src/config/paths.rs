//! Path management for flag-audit
//!
//! ## Path Resolution Order
//!
//! 1. `FLAG_AUDIT_DATA_DIR` environment variable (if set)
//! 2. The platform config directory joined with `flag-audit`
//!    (`~/.config/flag-audit` on Linux, `%APPDATA%\flag-audit` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::AuditError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "FLAG_AUDIT_DATA_DIR";

/// Manages all paths used by flag-audit
#[derive(Debug, Clone)]
pub struct AuditPaths {
    base_dir: PathBuf,
}

impl AuditPaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no override is set and the platform config
    /// directory cannot be determined.
    pub fn new() -> Result<Self, AuditError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create AuditPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log store (one JSON record per line)
    pub fn audit_log_store(&self) -> PathBuf {
        self.base_dir.join("audit_logs.jsonl")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), AuditError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| AuditError::Io(format!("Failed to create base directory: {}", e)))
    }
}

fn resolve_default_path() -> Result<PathBuf, AuditError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| AuditError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("flag-audit"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AuditPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.audit_log_store(),
            temp_dir.path().join("audit_logs.jsonl")
        );
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var(DATA_DIR_ENV, custom_path);
        let paths = AuditPaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());

        env::remove_var(DATA_DIR_ENV);
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested").join("flag-audit");
        let paths = AuditPaths::with_base_dir(nested.clone());

        paths.ensure_directories().unwrap();
        assert!(nested.exists());
    }
}
