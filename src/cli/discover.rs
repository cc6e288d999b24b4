//! Discover command handler.
//!
//! Lists the specification files found under a directory.

use crate::discovery::{discover_spec_files, DiscoveryConfig};
use crate::model::SpecDialect;
use crate::parsers::parse_value;
use crate::pipeline::{exit_codes, write_output, OutputTarget};
use crate::reports::ReportFormat;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Build the effective discovery config for one invocation.
///
/// `extra_paths` are probed after the base list; `no_defaults` starts from
/// an empty list instead of `base`.
#[must_use]
pub fn discovery_for(base: &DiscoveryConfig, extra_paths: &[String], no_defaults: bool) -> DiscoveryConfig {
    let start = if no_defaults {
        DiscoveryConfig::empty()
    } else {
        base.clone()
    };
    start.with_paths(extra_paths.iter().cloned())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DiscoveredEntry {
    search_path: String,
    path: String,
    dialect: String,
}

/// Run the discover command, returning the desired exit code.
pub fn run_discover(
    root: &Path,
    config: &DiscoveryConfig,
    output: ReportFormat,
    output_file: Option<PathBuf>,
    quiet: bool,
) -> Result<i32> {
    let found = discover_spec_files(root, config)
        .with_context(|| format!("Failed to search {}", root.display()))?;

    let entries: Vec<DiscoveredEntry> = found
        .iter()
        .map(|spec| DiscoveredEntry {
            search_path: spec.search_path.clone(),
            path: spec.path.display().to_string(),
            dialect: parse_value(&spec.content)
                .map(|root| SpecDialect::detect(&root))
                .unwrap_or_default()
                .to_string(),
        })
        .collect();

    let content = match output {
        ReportFormat::Json => serde_json::to_string_pretty(&entries)
            .map_err(|e| anyhow::anyhow!("Failed to serialize discovery results: {e}"))?,
        _ if entries.is_empty() => format!(
            "No specification files found under {} ({} search paths)",
            root.display(),
            config.search_paths().len()
        ),
        _ => entries
            .iter()
            .map(|e| format!("{}\t{}", e.search_path, e.dialect))
            .collect::<Vec<_>>()
            .join("\n"),
    };
    write_output(&content, &OutputTarget::from_option(output_file), quiet)?;

    Ok(if entries.is_empty() {
        exit_codes::INVALID_INPUT
    } else {
        exit_codes::SUCCESS
    })
}
