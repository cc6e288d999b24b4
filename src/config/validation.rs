//! Configuration validation for oas-compare.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, BehaviorConfig, DiffConfig, OutputConfig};
use crate::discovery::DiscoveryConfig;
use std::path::Path;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors.extend(self.discovery.validate());
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(parent) = self.file.as_deref().and_then(Path::parent) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                errors.push(ConfigError::new(
                    "output.file",
                    format!("Parent directory does not exist: {}", parent.display()),
                ));
            }
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

impl Validatable for DiscoveryConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        for (i, path) in self.search_paths().iter().enumerate() {
            let field = format!("discovery.search_paths[{i}]");
            if path.trim().is_empty() {
                errors.push(ConfigError::new(field, "Search path must not be empty"));
            } else if Path::new(path).is_absolute() {
                errors.push(ConfigError::new(
                    field,
                    format!("Search path must be relative to the discovery root, got {path}"),
                ));
            }
        }
        errors
    }
}

impl Validatable for DiffConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (field, path) in [("paths.base", &self.paths.base), ("paths.target", &self.paths.target)] {
            if !path.exists() {
                errors.push(ConfigError::new(
                    field,
                    format!("Path does not exist: {}", path.display()),
                ));
            }
        }

        for (field, label) in [("labels.base", &self.labels.base), ("labels.target", &self.labels.target)] {
            if label.as_deref().is_some_and(|l| l.trim().is_empty()) {
                errors.push(ConfigError::new(field, "Label must not be blank"));
            }
        }

        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors.extend(self.discovery.validate());
        errors
    }
}
