//! Configuration types for oas-compare operations.
//!
//! Provides structured configuration for the diff, validate and discover
//! commands.

use crate::diff::{DiffEngine, Severity};
use crate::discovery::DiscoveryConfig;
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// This is the top-level configuration struct. It can be constructed from
/// CLI arguments, config files, or both (with CLI overriding file settings).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
    /// Diff engine settings
    pub diff: DiffSettings,
    /// Where to look for specifications inside a directory
    pub discovery: DiscoveryConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Enable fail-on-change mode.
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    /// Set the severity threshold for exit code 2.
    pub const fn fail_on_severity(mut self, severity: Option<Severity>) -> Self {
        self.config.behavior.fail_on_severity = severity;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Report methods added to or removed from shared paths.
    pub const fn report_method_changes(mut self, enabled: bool) -> Self {
        self.config.diff.report_method_changes = enabled;
        self
    }

    /// Replace the discovery search paths.
    pub fn discovery(mut self, discovery: DiscoveryConfig) -> Self {
        self.config.discovery = discovery;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Command-specific Configuration Types
// ============================================================================

/// Configuration for diff operations
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Paths to compare
    pub paths: DiffPaths,
    /// Version labels echoed into reports
    pub labels: DiffLabels,
    /// Output configuration
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
    /// Diff engine settings
    pub diff: DiffSettings,
    /// Discovery used when a path is a directory
    pub discovery: DiscoveryConfig,
}

impl DiffConfig {
    /// Combine the two input paths with an application config.
    #[must_use]
    pub fn from_app(paths: DiffPaths, app: AppConfig) -> Self {
        Self {
            paths,
            labels: DiffLabels::default(),
            output: app.output,
            behavior: app.behavior,
            diff: app.diff,
            discovery: app.discovery,
        }
    }

    #[must_use]
    pub fn with_labels(mut self, labels: DiffLabels) -> Self {
        self.labels = labels;
        self
    }
}

/// Paths for diff operation
#[derive(Debug, Clone)]
pub struct DiffPaths {
    /// Baseline specification (file or directory)
    pub base: PathBuf,
    /// Specification to compare against the baseline (file or directory)
    pub target: PathBuf,
}

/// Version labels for both sides; the file name is used when absent.
#[derive(Debug, Clone, Default)]
pub struct DiffLabels {
    pub base: Option<String>,
    pub target: Option<String>,
}

// ============================================================================
// Individual Configuration Types
// ============================================================================

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

/// Behavior flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if any changes detected
    pub fail_on_change: bool,
    /// Exit with code 2 if any change is at or above this severity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_on_severity: Option<Severity>,
    /// Suppress non-essential output
    pub quiet: bool,
}

/// Diff engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DiffSettings {
    /// Report methods added to or removed from a path present on both sides
    pub report_method_changes: bool,
    /// Skip diffing when both source texts are byte-identical
    pub skip_identical: bool,
}

impl Default for DiffSettings {
    fn default() -> Self {
        Self {
            report_method_changes: false,
            skip_identical: true,
        }
    }
}

impl DiffSettings {
    /// Engine configured with these settings.
    #[must_use]
    pub const fn engine(&self) -> DiffEngine {
        DiffEngine::new()
            .with_method_level_changes(self.report_method_changes)
            .skip_identical(self.skip_identical)
    }
}
