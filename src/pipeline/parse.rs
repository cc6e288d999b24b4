//! Loading specification files from disk.
//!
//! Resolves each input path (a file, or a directory searched with
//! [`DiscoveryConfig`]) into a [`SpecFile`] ready for comparison.

use super::SpecFile;
use crate::config::DiffConfig;
use crate::discovery::{discover_first, DiscoveryConfig};
use crate::parsers::read_spec_file;
use crate::utils::content_hash;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

/// Load one specification.
///
/// A directory is resolved through discovery; the first match wins. The
/// version label defaults to the file name. Local files have no commit, so
/// the content hash stands in for the commit hash and the modification
/// time for the commit date.
pub fn load_spec_file(
    path: &Path,
    label: Option<&str>,
    discovery: &DiscoveryConfig,
) -> Result<SpecFile> {
    let (resolved, content) = if path.is_dir() {
        let found = discover_first(path, discovery)?.ok_or_else(|| {
            anyhow!(
                "No OpenAPI/Swagger specification found under {} ({} search paths)",
                path.display(),
                discovery.search_paths().len()
            )
        })?;
        tracing::info!("Discovered {} under {}", found.search_path, path.display());
        (found.path, found.content)
    } else {
        let content = read_spec_file(path)
            .with_context(|| format!("Failed to read specification: {}", path.display()))?;
        (path.to_path_buf(), content)
    };

    let version = label.map_or_else(|| default_label(&resolved), ToString::to_string);
    let commit_hash = format!("{:016x}", content_hash(&content));
    let commit_date = modified_time(&resolved).unwrap_or_else(Utc::now);

    Ok(SpecFile::new(resolved.display().to_string(), content)
        .with_version(version)
        .with_commit(commit_hash, commit_date))
}

/// Load both sides of a diff in parallel.
pub fn load_spec_pair(config: &DiffConfig) -> Result<(SpecFile, SpecFile)> {
    let (base, target) = rayon::join(
        || {
            load_spec_file(
                &config.paths.base,
                config.labels.base.as_deref(),
                &config.discovery,
            )
        },
        || {
            load_spec_file(
                &config.paths.target,
                config.labels.target.as_deref(),
                &config.discovery,
            )
        },
    );
    let base = base.context("Failed to load base specification")?;
    let target = target.context("Failed to load target specification")?;
    Ok((base, target))
}

fn default_label(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

fn modified_time(path: &Path) -> Option<DateTime<Utc>> {
    let modified = std::fs::metadata(path).and_then(|m| m.modified()).ok()?;
    Some(DateTime::<Utc>::from(modified))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_file_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("petstore.yaml");
        std::fs::write(&path, "openapi: 3.0.0\n").unwrap();

        let spec = load_spec_file(&path, None, &DiscoveryConfig::defaults()).unwrap();
        assert_eq!(spec.version, "petstore.yaml");
        assert_eq!(spec.content, "openapi: 3.0.0\n");
        assert_eq!(spec.commit_hash.len(), 16);
        assert!(spec.commit_date > DateTime::<Utc>::default());
    }

    #[test]
    fn test_load_directory_through_discovery() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs/openapi.yml"), "openapi: 3.1.0\n").unwrap();

        let spec = load_spec_file(dir.path(), Some("v2"), &DiscoveryConfig::defaults()).unwrap();
        assert_eq!(spec.version, "v2");
        assert!(spec.path.ends_with("openapi.yml"));
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load_spec_file(dir.path(), None, &DiscoveryConfig::defaults()).unwrap_err();
        assert!(err.to_string().contains("No OpenAPI/Swagger specification found"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_spec_file(Path::new("/nonexistent/openapi.yaml"), None, &DiscoveryConfig::defaults())
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read specification"));
    }
}
