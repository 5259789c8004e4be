//! Audit log normalization and diffing
//!
//! Turns raw backend audit log records into something a person can read.
//!
//! # Architecture
//!
//! - `build_view_model`: classifies a record (created / deleted / updated /
//!   current version), including legacy record shapes, and picks the two
//!   snapshots to diff.
//! - `render_diff`: pretty-prints both snapshots and produces a line diff
//!   for the changes or snapshot tab.
//! - `summarize_changes` / `detailed_changes`: field-level change summaries.
//! - `AuditLogStore`: the local JSONL record store standing in for the backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use flag_audit::audit::{build_view_model, render_diff, DiffTab};
//!
//! let vm = build_view_model(Some(&record));
//! if vm.has_displayable_data && !vm.effective_is_same_data {
//!     let rows = render_diff(&vm.diff_old_value, &vm.diff_new_value, DiffTab::Changes, 3);
//! }
//! ```

mod diff;
mod json;
mod render;
mod store;
mod view_model;

pub use diff::{detailed_changes, field_changes, summarize_changes, FieldChange};
pub use json::{parse_snapshot, pretty_snapshot, same_snapshot};
pub use render::{diff_lines, render_diff, DiffLine, DiffRow, DiffTab, LineKind};
pub use store::{AuditLogStore, ImportSummary};
pub use view_model::{build_view_model, AuditLogViewModel, Classification};
