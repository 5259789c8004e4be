//! Event type classification
//!
//! Audit log event types are tags such as `FEATURE_CREATED` or
//! `ENVIRONMENT_V2_UNARCHIVED`. Only the last `_`-separated segment carries
//! meaning for display: it decides the action label and whether the record
//! is treated as a creation, a deletion, or an update.

use std::fmt;

/// Trailing segment of an event type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSuffix {
    Created,
    Deleted,
    Updated,
    Archived,
    Unarchived,
    Enabled,
    Disabled,
    Cloned,
    /// Any other suffix (`RENAMED`, `CHANGED`, `ADDED`, ...)
    Other,
}

impl EventSuffix {
    /// Classify an event type tag by its last `_`-separated segment
    pub fn of(event_type: &str) -> Self {
        let last = event_type.rsplit('_').next().unwrap_or_default();
        match last {
            "CREATED" => Self::Created,
            "DELETED" => Self::Deleted,
            "UPDATED" => Self::Updated,
            "ARCHIVED" => Self::Archived,
            "UNARCHIVED" => Self::Unarchived,
            "ENABLED" => Self::Enabled,
            "DISABLED" => Self::Disabled,
            "CLONED" => Self::Cloned,
            _ => Self::Other,
        }
    }

    /// Human-readable action label ("created", "archived", ...)
    ///
    /// Unrecognized suffixes read as "updated".
    pub fn action_label(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Deleted => "deleted",
            Self::Archived => "archived",
            Self::Unarchived => "unarchived",
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
            Self::Cloned => "cloned",
            Self::Updated | Self::Other => "updated",
        }
    }

    /// Coarse event kind driving diff normalization
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Created => EventKind::Creation,
            Self::Deleted => EventKind::Deletion,
            _ => EventKind::Update,
        }
    }
}

impl fmt::Display for EventSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.action_label())
    }
}

/// Creation, deletion, or anything else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Creation,
    Deletion,
    Update,
}

impl EventKind {
    pub fn of(event_type: &str) -> Self {
        EventSuffix::of(event_type).kind()
    }
}
