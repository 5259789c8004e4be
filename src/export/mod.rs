//! Export module for flag-audit
//!
//! Writes audit log query results to CSV for spreadsheets.

pub mod csv;

pub use self::csv::export_records_csv;
