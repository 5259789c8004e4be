//! flag-audit - Terminal console for feature-flag audit logs
//!
//! This library provides the core functionality for browsing the audit log
//! of a feature-flag and experimentation platform: classifying each record,
//! choosing which entity snapshots to compare, and rendering their diff.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Audit log records, editors, entity and event types
//! - `audit`: View model normalization, diffing, and the local record store
//! - `query`: Filtering, ordering, and pagination of records
//! - `display`: Terminal formatting
//! - `export`: CSV export
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use flag_audit::audit::{build_view_model, Classification};
//!
//! let vm = build_view_model(Some(&record));
//! assert_eq!(vm.classification, Classification::Created);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod query;

pub use error::{AuditError, AuditResult};
