//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the query and display layers.

pub mod audit;

pub use audit::{handle_audit_command, AuditCommands, FilterArgs, PageArgs};
