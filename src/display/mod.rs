//! Display formatting for terminal output
//!
//! Provides utilities for formatting audit log pages and records for
//! terminal display.

pub mod record;

pub use record::{change_summary, format_diff_rows, format_record_details, format_record_list};
