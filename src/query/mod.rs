//! Audit log list queries
//!
//! Filtering, ordering and pagination over audit log records, with the same
//! knobs the backend's list endpoint exposes: page, page size, sort order,
//! free-text search on the editor, entity type, date range, and entity id
//! for per-entity history.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::{AuditError, AuditResult};
use crate::models::{AuditLogRecord, EntityType};

/// Sort direction on timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first
    Asc,
    /// Newest first
    #[default]
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// Parameters for listing audit logs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogQuery {
    /// 1-based page number
    pub page: usize,
    /// Records per page
    pub page_size: usize,
    pub order: SortOrder,
    /// Case-insensitive substring of the editor's name or email
    pub search_keyword: Option<String>,
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<String>,
    /// Inclusive lower bound, seconds since epoch; `0` is unbounded
    pub from: Option<i64>,
    /// Inclusive upper bound, seconds since epoch; `0` is unbounded
    pub to: Option<i64>,
}

impl Default for AuditLogQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
            order: SortOrder::Desc,
            search_keyword: None,
            entity_type: None,
            entity_id: None,
            from: None,
            to: None,
        }
    }
}

/// One page of results
#[derive(Debug, Clone)]
pub struct AuditLogPage {
    pub records: Vec<AuditLogRecord>,
    pub page: usize,
    /// Next page number, `None` on the last page
    pub next_page: Option<usize>,
    /// Matching records across all pages
    pub total_count: usize,
}

impl AuditLogQuery {
    /// Date-range bounds with `0` treated as unset
    fn time_bounds(&self) -> (Option<i64>, Option<i64>) {
        (
            self.from.filter(|&secs| secs != 0),
            self.to.filter(|&secs| secs != 0),
        )
    }

    fn validate(&self) -> AuditResult<()> {
        if self.page == 0 {
            return Err(AuditError::Validation("page numbers start at 1".into()));
        }
        if self.page_size == 0 {
            return Err(AuditError::Validation(
                "page size must be greater than zero".into(),
            ));
        }
        if let (Some(from), Some(to)) = self.time_bounds() {
            if from > to {
                return Err(AuditError::Validation(format!(
                    "date range start ({}) is after its end ({})",
                    from, to
                )));
            }
        }
        Ok(())
    }

    /// Whether a record passes every filter
    pub fn matches(&self, record: &AuditLogRecord) -> bool {
        if let Some(entity_type) = self.entity_type {
            if record.entity_type != entity_type {
                return false;
            }
        }

        if let Some(entity_id) = &self.entity_id {
            if record.entity_id.as_deref() != Some(entity_id.as_str()) {
                return false;
            }
        }

        let (from, to) = self.time_bounds();
        if from.is_some() || to.is_some() {
            let Some(ts) = record.timestamp_secs() else {
                return false;
            };
            if from.is_some_and(|from| ts < from) || to.is_some_and(|to| ts > to) {
                return false;
            }
        }

        if let Some(keyword) = self.search_keyword.as_deref().map(str::trim) {
            if !keyword.is_empty() {
                let keyword = keyword.to_lowercase();
                let editor = &record.editor;
                if !editor.name.to_lowercase().contains(&keyword)
                    && !editor.email.to_lowercase().contains(&keyword)
                {
                    return false;
                }
            }
        }

        true
    }

    /// Filter, sort and paginate records
    ///
    /// Records with equal timestamps keep their store order. Records with a
    /// non-numeric timestamp sort as the oldest.
    pub fn run(&self, records: Vec<AuditLogRecord>) -> AuditResult<AuditLogPage> {
        self.validate()?;

        let mut matching: Vec<AuditLogRecord> =
            records.into_iter().filter(|r| self.matches(r)).collect();

        let key = |r: &AuditLogRecord| r.timestamp_secs().unwrap_or(i64::MIN);
        match self.order {
            SortOrder::Asc => matching.sort_by_key(key),
            SortOrder::Desc => matching.sort_by(|a, b| key(b).cmp(&key(a))),
        }

        let total_count = matching.len();
        let offset = (self.page - 1).saturating_mul(self.page_size);
        let records: Vec<AuditLogRecord> = matching
            .into_iter()
            .skip(offset)
            .take(self.page_size)
            .collect();
        let next_page = self
            .page
            .checked_add(1)
            .filter(|_| offset.saturating_add(records.len()) < total_count);

        debug!(
            page = self.page,
            returned = records.len(),
            total = total_count,
            "ran audit log query"
        );

        Ok(AuditLogPage {
            records,
            page: self.page,
            next_page,
            total_count,
        })
    }
}

/// Parse a date-range bound from user input
///
/// Accepts `YYYY-MM-DD` (start of day for a lower bound, end of day for an
/// upper bound, UTC) or raw seconds since epoch.
pub fn parse_time_bound(input: &str, end_of_day: bool) -> AuditResult<i64> {
    let input = input.trim();
    if let Ok(secs) = input.parse::<i64>() {
        return Ok(secs);
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        AuditError::Validation(format!(
            "Invalid date: {}. Use YYYY-MM-DD or seconds since epoch",
            input
        ))
    })?;
    let time = if end_of_day {
        NaiveTime::from_hms_opt(23, 59, 59)
    } else {
        NaiveTime::from_hms_opt(0, 0, 0)
    }
    .ok_or_else(|| AuditError::Validation(format!("Invalid date: {}", input)))?;

    Ok(Utc.from_utc_datetime(&date.and_time(time)).timestamp())
}
