//! Audit log record model
//!
//! Mirrors the records returned by the backend's list API. Field names on the
//! wire are camelCase; entity snapshots are carried as raw JSON text.

use std::fmt::Write;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::entity_type::EntityType;
use super::event_type::EventSuffix;

/// Who made the change
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Editor {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Editor {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            avatar_url: None,
        }
    }

    /// Name if set, otherwise the email address
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

/// A single audit log record as produced by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogRecord {
    /// Opaque identifier
    pub id: String,

    /// Event type tag, e.g. `FEATURE_CREATED`
    #[serde(rename = "type", default)]
    pub event_type: String,

    /// Entity snapshot after the event (JSON text, empty if not applicable)
    #[serde(default)]
    pub entity_data: String,

    /// Entity snapshot before the event (JSON text, empty if not applicable)
    #[serde(default)]
    pub previous_entity_data: String,

    /// Seconds since epoch as a numeric string
    #[serde(default, deserialize_with = "string_or_number")]
    pub timestamp: String,

    #[serde(default)]
    pub editor: Editor,

    #[serde(default)]
    pub entity_type: EntityType,

    /// ID of the changed entity, when the backend provides it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
}

impl AuditLogRecord {
    /// Trailing segment of the event type
    pub fn suffix(&self) -> EventSuffix {
        EventSuffix::of(&self.event_type)
    }

    /// Human-readable action label for this record
    pub fn action_label(&self) -> &'static str {
        self.suffix().action_label()
    }

    /// Timestamp in seconds, or `None` if the field isn't numeric
    pub fn timestamp_secs(&self) -> Option<i64> {
        self.timestamp.trim().parse().ok()
    }

    /// Timestamp as a UTC date-time
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp_secs()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
    }

    /// Format the timestamp with a strftime pattern, falling back to the raw value
    ///
    /// The raw value is also used when the pattern itself is invalid.
    pub fn format_timestamp(&self, format: &str) -> String {
        let Some(dt) = self.occurred_at() else {
            return self.timestamp.clone();
        };
        let mut formatted = String::new();
        match write!(formatted, "{}", dt.format(format)) {
            Ok(()) => formatted,
            Err(_) => self.timestamp.clone(),
        }
    }
}

/// Accept a JSON string or number and keep it as text
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Int(i64),
        Float(f64),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Int(n) => n.to_string(),
        StringOrNumber::Float(f) => (f.trunc() as i64).to_string(),
    })
}
