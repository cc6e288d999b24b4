//! Configuration module for oas-compare.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```
//! use oas_compare::config::AppConfig;
//! use oas_compare::diff::Severity;
//!
//! let config = AppConfig::builder()
//!     .fail_on_severity(Some(Severity::High))
//!     .report_method_changes(true)
//!     .build();
//! assert!(config.diff.report_method_changes);
//! ```
//!
//! # Configuration File
//!
//! Place a `.oas-compare.yaml` file in your project root or `~/.config/oas-compare/`:
//!
//! ```yaml
//! output:
//!   format: markdown
//! behavior:
//!   fail_on_severity: high
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, DiffConfig, DiffLabels, DiffPaths, DiffSettings,
    OutputConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, user_config_dir, ConfigFileError, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.oas-compare.yaml` config files. It can be used by editors for
/// validation and autocompletion.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}
