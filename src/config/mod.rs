//! Configuration module for flag-audit
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::AuditPaths;
pub use settings::Settings;
