//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".oas-compare.yaml",
    ".oas-compare.yml",
    "oas-compare.yaml",
    "oas-compare.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/oas-compare/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    // 1. Use explicit path if provided
    if let Some(path) = explicit_path.filter(|p| p.exists()) {
        return Some(path.to_path_buf());
    }

    // 2. Search current directory
    let cwd = std::env::current_dir().ok();
    if let Some(path) = cwd.as_deref().and_then(find_config_in_dir) {
        return Some(path);
    }

    // 3. Search git root (if in a repo)
    if let Some(path) = find_git_root().as_deref().and_then(find_config_in_dir) {
        return Some(path);
    }

    // 4. Search user config directory
    if let Some(path) = user_config_dir().as_deref().and_then(find_config_in_dir) {
        return Some(path);
    }

    // 5. Search home directory
    dirs::home_dir().as_deref().and_then(find_config_in_dir)
}

/// Per-user configuration directory (`<config_dir>/oas-compare`).
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("oas-compare"))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    /// File not found
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// IO error reading file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from their defaults count as set, so CLI args
    /// left at their defaults do not clobber file settings.
    pub fn merge(&mut self, other: &Self) {
        // Output config
        if other.output.format != ReportFormat::Auto {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }

        // Behavior config (booleans - if set to true, override)
        if other.behavior.fail_on_change {
            self.behavior.fail_on_change = true;
        }
        if other.behavior.fail_on_severity.is_some() {
            self.behavior.fail_on_severity = other.behavior.fail_on_severity;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }

        // Diff settings
        if other.diff.report_method_changes {
            self.diff.report_method_changes = true;
        }
        if !other.diff.skip_identical {
            self.diff.skip_identical = false;
        }

        // Discovery: a non-default list replaces the file's list
        if other.discovery != crate::discovery::DiscoveryConfig::defaults() {
            self.discovery.clone_from(&other.discovery);
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content from the defaults.
#[must_use]
pub fn generate_example_config() -> String {
    format!(
        "# oas-compare configuration\n\
         # Place this file at .oas-compare.yaml in your project root or ~/.config/oas-compare/\n\n{}",
        serde_yaml::to_string(&AppConfig::default()).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# oas-compare Configuration File
# ===============================
#
# Place it at:
#   - .oas-compare.yaml in your project root
#   - ~/.config/oas-compare/oas-compare.yaml for global config
#
# CLI arguments always override file settings.

# Output configuration
output:
  # Format: auto, json, summary, markdown
  format: auto
  # Output file path (omit for stdout)
  # file: api-changes.md
  # Disable colored output
  no_color: false

# Behavior flags
behavior:
  # Exit with code 1 if any changes detected
  fail_on_change: false
  # Exit with code 2 if any change is at or above this severity: low, medium, high
  # fail_on_severity: high
  # Suppress non-essential output
  quiet: false

# Diff engine
diff:
  # Also report methods added to or removed from paths present in both versions
  report_method_changes: false
  # Skip diffing byte-identical documents
  skip_identical: true

# Locations probed when a directory is given instead of a file
discovery:
  search_paths:
    - swagger.yaml
    - swagger.yml
    - openapi.yaml
    - openapi.yml
    - api.yaml
    - api.yml
    - swagger/swagger.yaml
    - swagger/swagger.yml
    - docs/swagger.yaml
    - docs/swagger.yml
    - docs/openapi.yaml
    - docs/openapi.yml
    - openapi/openapi.yaml
    - openapi/openapi.yml
    - api/swagger.yaml
    - api/swagger.yml
    - api/openapi.yaml
    - api/openapi.yml
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
