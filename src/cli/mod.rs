//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod diff;
mod discover;
mod validate;

pub use diff::run_diff;
pub use discover::{discovery_for, run_discover};
pub use validate::{run_validate, validate_file, ValidationOutcome};

// Re-export config types used by handlers
pub use crate::config::DiffConfig;
