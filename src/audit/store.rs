//! Local audit log store
//!
//! Stands in for the backend's audit log table. Records are kept in a
//! line-delimited JSON file (JSONL), one backend record per line, in the
//! order they were imported.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{AuditError, AuditResult};
use crate::models::AuditLogRecord;

/// Reads and appends audit log records
pub struct AuditLogStore {
    store_path: PathBuf,
}

/// Shapes accepted by [`AuditLogStore::import_file`]
#[derive(Deserialize)]
#[serde(untagged)]
enum ImportDocument {
    /// A list response from the backend
    ListResponse {
        #[serde(rename = "auditLogs")]
        audit_logs: Vec<AuditLogRecord>,
    },
    /// A bare array of records
    Records(Vec<AuditLogRecord>),
}

/// Outcome of an import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    /// Records whose id was already in the store
    pub skipped_duplicates: usize,
}

impl AuditLogStore {
    pub fn new(store_path: PathBuf) -> Self {
        Self { store_path }
    }

    /// Append several records and flush once at the end
    pub fn append_batch(&self, records: &[AuditLogRecord]) -> AuditResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        if let Some(parent) = self.store_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AuditError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.store_path)
            .map_err(|e| AuditError::Storage(format!("Failed to open audit log store: {}", e)))?;

        for record in records {
            let json = serde_json::to_string(record)
                .map_err(|e| AuditError::Json(format!("Failed to serialize record: {}", e)))?;
            writeln!(file, "{}", json)
                .map_err(|e| AuditError::Storage(format!("Failed to write record: {}", e)))?;
        }

        file.flush()
            .map_err(|e| AuditError::Storage(format!("Failed to flush audit log store: {}", e)))?;

        debug!(count = records.len(), path = %self.store_path.display(), "appended audit log records");
        Ok(())
    }

    /// Read every record, in store order
    pub fn read_all(&self) -> AuditResult<Vec<AuditLogRecord>> {
        if !self.store_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.store_path)
            .map_err(|e| AuditError::Storage(format!("Failed to open audit log store: {}", e)))?;

        let mut records = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                AuditError::Storage(format!(
                    "Failed to read audit log store line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let record: AuditLogRecord = serde_json::from_str(&line).map_err(|e| {
                AuditError::Storage(format!(
                    "Failed to parse record at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;
            records.push(record);
        }

        debug!(count = records.len(), "loaded audit log store");
        Ok(records)
    }

    /// Look up a record by id
    pub fn find(&self, id: &str) -> AuditResult<AuditLogRecord> {
        self.read_all()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| AuditError::record_not_found(id))
    }

    /// Import records from a JSON file
    ///
    /// Accepts a bare array of records or a backend list response
    /// (`{"auditLogs": [...]}`). Records whose id is already stored, or
    /// repeats within the file, are skipped.
    pub fn import_file(&self, source: &Path) -> AuditResult<ImportSummary> {
        let contents = std::fs::read_to_string(source).map_err(|e| {
            AuditError::Import(format!("Failed to read {}: {}", source.display(), e))
        })?;

        let incoming = match serde_json::from_str::<ImportDocument>(&contents) {
            Ok(ImportDocument::ListResponse { audit_logs }) => audit_logs,
            Ok(ImportDocument::Records(records)) => records,
            Err(e) => {
                return Err(AuditError::Import(format!(
                    "{} is neither a record array nor a list response: {}",
                    source.display(),
                    e
                )))
            }
        };

        let mut seen: HashSet<String> = self.read_all()?.into_iter().map(|r| r.id).collect();
        let total = incoming.len();
        let fresh: Vec<AuditLogRecord> = incoming
            .into_iter()
            .filter(|r| {
                if r.id.is_empty() {
                    warn!("skipping record without an id");
                    return false;
                }
                seen.insert(r.id.clone())
            })
            .collect();

        self.append_batch(&fresh)?;

        let summary = ImportSummary {
            imported: fresh.len(),
            skipped_duplicates: total - fresh.len(),
        };
        info!(
            imported = summary.imported,
            skipped = summary.skipped_duplicates,
            source = %source.display(),
            "imported audit log records"
        );
        Ok(summary)
    }
}
