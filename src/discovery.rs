//! Specification file discovery in a local directory tree.
//!
//! The set of conventional locations to probe is an explicit value
//! ([`DiscoveryConfig`]) handed to every [`discover_spec_files`] call. Adding
//! or removing a location produces a new config; nothing is shared between
//! calls.

use crate::error::{OasCompareError, Result};
use crate::parsers::{looks_like_spec, read_spec_file};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Conventional specification locations, relative to a project root, in
/// probe order.
pub const DEFAULT_SEARCH_PATHS: [&str; 18] = [
    "swagger.yaml",
    "swagger.yml",
    "openapi.yaml",
    "openapi.yml",
    "api.yaml",
    "api.yml",
    "swagger/swagger.yaml",
    "swagger/swagger.yml",
    "docs/swagger.yaml",
    "docs/swagger.yml",
    "docs/openapi.yaml",
    "docs/openapi.yml",
    "openapi/openapi.yaml",
    "openapi/openapi.yml",
    "api/swagger.yaml",
    "api/swagger.yml",
    "api/openapi.yaml",
    "api/openapi.yml",
];

/// Locations probed by [`discover_spec_files`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Relative paths probed in order; duplicates are ignored
    pub search_paths: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

impl DiscoveryConfig {
    /// Config probing [`DEFAULT_SEARCH_PATHS`].
    #[must_use]
    pub fn defaults() -> Self {
        Self::new(DEFAULT_SEARCH_PATHS)
    }

    /// Config probing exactly `paths`, in order.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::empty().with_paths(paths)
    }

    /// Config probing nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            search_paths: Vec::new(),
        }
    }

    /// Append a location unless it is already present.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        if !self.search_paths.contains(&path) {
            self.search_paths.push(path);
        }
        self
    }

    /// Append several locations, skipping duplicates.
    #[must_use]
    pub fn with_paths<I, S>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        paths.into_iter().fold(self, Self::with_path)
    }

    /// Drop a location if present.
    #[must_use]
    pub fn without_path(mut self, path: &str) -> Self {
        self.search_paths.retain(|p| p != path);
        self
    }

    #[must_use]
    pub fn search_paths(&self) -> &[String] {
        &self.search_paths
    }
}

/// A specification file found under a discovery root.
#[derive(Debug, Clone)]
pub struct DiscoveredSpec {
    /// The search path that matched
    pub search_path: String,
    /// Full path on disk
    pub path: PathBuf,
    pub content: String,
}

/// Probe every configured location under `root`, in order.
///
/// Missing or unreadable candidates and files that do not look like a
/// specification are skipped.
pub fn discover_spec_files(root: &Path, config: &DiscoveryConfig) -> Result<Vec<DiscoveredSpec>> {
    if !root.is_dir() {
        return Err(OasCompareError::validation(format!(
            "discovery root {} is not a directory",
            root.display()
        )));
    }
    tracing::debug!(
        "Probing {} search paths under {}",
        config.search_paths.len(),
        root.display()
    );

    let mut found = Vec::new();
    for search_path in &config.search_paths {
        let candidate = root.join(search_path);
        if !candidate.is_file() {
            continue;
        }
        let content = match read_spec_file(&candidate) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("Skipping {}: {}", candidate.display(), e);
                continue;
            }
        };
        if !looks_like_spec(&content) {
            tracing::debug!("Skipping {}: not an OpenAPI/Swagger document", candidate.display());
            continue;
        }
        found.push(DiscoveredSpec {
            search_path: search_path.clone(),
            path: candidate,
            content,
        });
    }

    tracing::debug!("Discovered {} specification files", found.len());
    Ok(found)
}

/// First match of [`discover_spec_files`], if any.
pub fn discover_first(root: &Path, config: &DiscoveryConfig) -> Result<Option<DiscoveredSpec>> {
    Ok(discover_spec_files(root, config)?.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = DiscoveryConfig::defaults();
        assert_eq!(config.search_paths().len(), 18);
        assert_eq!(config.search_paths()[0], "swagger.yaml");
        assert_eq!(config.search_paths()[17], "api/openapi.yml");
    }

    #[test]
    fn test_value_semantics() {
        let base = DiscoveryConfig::defaults();
        let extended = base.clone().with_path("spec/openapi.json");
        let trimmed = base.clone().without_path("api.yaml");

        assert_eq!(base.search_paths().len(), 18);
        assert_eq!(extended.search_paths().len(), 19);
        assert_eq!(trimmed.search_paths().len(), 17);
        assert!(!trimmed.search_paths().contains(&"api.yaml".to_string()));
    }

    #[test]
    fn test_with_path_ignores_duplicates() {
        let config = DiscoveryConfig::new(["a.yaml"]).with_path("a.yaml").with_paths(["b.yaml", "a.yaml"]);
        assert_eq!(config.search_paths(), ["a.yaml", "b.yaml"]);
    }

    #[test]
    fn test_discover_in_order_and_skip_non_specs() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs/openapi.yaml"), "openapi: 3.0.0\npaths: {}\n").unwrap();
        std::fs::write(dir.path().join("swagger.yaml"), "swagger: '2.0'\n").unwrap();
        std::fs::write(dir.path().join("api.yaml"), "name: not-a-spec\n").unwrap();

        let found = discover_spec_files(dir.path(), &DiscoveryConfig::defaults()).unwrap();
        let matched: Vec<_> = found.iter().map(|f| f.search_path.as_str()).collect();
        assert_eq!(matched, vec!["swagger.yaml", "docs/openapi.yaml"]);
    }

    #[test]
    fn test_discover_custom_paths_only() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("swagger.yaml"), "swagger: '2.0'\n").unwrap();
        std::fs::write(dir.path().join("spec.json"), r#"{"openapi": "3.1.0"}"#).unwrap();

        let config = DiscoveryConfig::new(["spec.json"]);
        let first = discover_first(dir.path(), &config).unwrap().unwrap();
        assert_eq!(first.search_path, "spec.json");
    }

    #[test]
    fn test_discover_requires_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("openapi.yaml");
        std::fs::write(&file, "openapi: 3.0.0\n").unwrap();
        assert!(discover_spec_files(&file, &DiscoveryConfig::defaults()).is_err());
    }
}
