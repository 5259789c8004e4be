//! Core data models for flag-audit
//!
//! This module contains the records the backend produces: audit log entries,
//! their editors, entity types, and event type classification.

pub mod entity_type;
pub mod event_type;
pub mod record;

pub use entity_type::EntityType;
pub use event_type::{EventKind, EventSuffix};
pub use record::{AuditLogRecord, Editor};
