//! Audit log view model
//!
//! Normalizes a raw [`AuditLogRecord`] into what the detail view needs: how to
//! classify the change, which two snapshots to diff, and whether there is
//! anything to compare at all.
//!
//! Older backend versions duplicated the post-event snapshot into both
//! `entityData` and `previousEntityData` for creation and deletion events,
//! instead of leaving one side empty. Both shapes are still in the log, so
//! the builder recognizes each:
//!
//! | shape                         | previous | entity | result    |
//! |-------------------------------|----------|--------|-----------|
//! | creation                      | empty    | X      | created   |
//! | creation (legacy)             | X        | X      | created   |
//! | deletion                      | X        | empty  | deleted   |
//! | deletion (legacy)             | X        | X      | deleted   |
//! | update                        | A        | B      | updated   |
//! | no-op (archive, enable, ...)  | X        | X      | current   |

use serde::Serialize;
use std::fmt;

use super::json::{pretty_snapshot, same_snapshot};
use crate::models::{AuditLogRecord, EventKind};

/// How a record is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    Created,
    Deleted,
    Updated,
    /// Both snapshots are identical; show the entity as it stands
    CurrentVersion,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Deleted => write!(f, "deleted"),
            Self::Updated => write!(f, "updated"),
            Self::CurrentVersion => write!(f, "current-version"),
        }
    }
}

/// Display-ready model derived from one audit log record
///
/// Rebuilt from the record on every use; it holds no state of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditLogViewModel {
    pub classification: Classification,

    /// Snapshots are semantically equal JSON
    pub is_same_data: bool,

    /// Same-data flag after creation/deletion overrides; drives "no changes"
    pub effective_is_same_data: bool,

    /// Legacy deletion: tagged DELETED with both snapshots present and equal
    pub should_show_as_deletion: bool,

    /// At least one snapshot is valid, non-empty JSON
    pub has_displayable_data: bool,

    /// Left-hand side handed to the diff renderer
    pub diff_old_value: String,

    /// Right-hand side handed to the diff renderer
    pub diff_new_value: String,

    /// Offer the "changes / snapshot" toggle
    pub should_show_changes_tabs: bool,
}

impl AuditLogViewModel {
    /// The model for a missing record
    pub fn neutral() -> Self {
        Self {
            classification: Classification::Updated,
            is_same_data: false,
            effective_is_same_data: false,
            should_show_as_deletion: false,
            has_displayable_data: false,
            diff_old_value: String::new(),
            diff_new_value: String::new(),
            should_show_changes_tabs: false,
        }
    }
}

/// Build the view model for a record
///
/// Never fails: malformed snapshots count as non-displayable, and a missing
/// record yields [`AuditLogViewModel::neutral`].
pub fn build_view_model(record: Option<&AuditLogRecord>) -> AuditLogViewModel {
    let Some(record) = record else {
        return AuditLogViewModel::neutral();
    };

    let entity_data = record.entity_data.as_str();
    let previous_entity_data = record.previous_entity_data.as_str();
    let kind = EventKind::of(&record.event_type);

    let is_same_data = same_snapshot(entity_data, previous_entity_data);
    let has_entity = !entity_data.is_empty();
    let has_previous = !previous_entity_data.is_empty();
    let both_present = has_entity && has_previous;

    // The DELETED tag wins over the shape-only creation check: legacy
    // deletions exist with only entityData populated.
    let is_deletion_event = kind == EventKind::Deletion;
    let should_show_as_deletion = is_deletion_event && both_present && is_same_data;
    let is_creation_event = !is_deletion_event
        && ((!has_previous && has_entity)
            || (kind == EventKind::Creation && is_same_data && both_present));

    let has_displayable_data =
        pretty_snapshot(entity_data).is_some() || pretty_snapshot(previous_entity_data).is_some();

    let forced_diff = is_creation_event || is_deletion_event || should_show_as_deletion;
    let effective_is_same_data = !forced_diff && is_same_data;
    let should_show_changes_tabs = forced_diff || !is_same_data;

    let classification = if is_creation_event {
        Classification::Created
    } else if is_deletion_event {
        Classification::Deleted
    } else if effective_is_same_data {
        Classification::CurrentVersion
    } else {
        Classification::Updated
    };

    let (diff_old_value, diff_new_value) = if is_deletion_event {
        let deleted = if has_entity {
            entity_data
        } else {
            previous_entity_data
        };
        (deleted.to_string(), String::new())
    } else if is_creation_event {
        (String::new(), entity_data.to_string())
    } else {
        (previous_entity_data.to_string(), entity_data.to_string())
    };

    AuditLogViewModel {
        classification,
        is_same_data,
        effective_is_same_data,
        should_show_as_deletion,
        has_displayable_data,
        diff_old_value,
        diff_new_value,
        should_show_changes_tabs,
    }
}
