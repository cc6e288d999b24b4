//! Validate command handler.
//!
//! Implements the `validate` subcommand: checks that each file looks like an
//! OpenAPI/Swagger document and parses, and reports what was extracted.

use crate::parsers::{detect_format, looks_like_spec, parse_spec_str, read_spec_file};
use crate::pipeline::{exit_codes, write_output, OutputTarget};
use crate::reports::ReportFormat;
use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Outcome of validating one file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub path: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialect: Option<String>,
    pub endpoints: usize,
    pub models: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationOutcome {
    fn invalid(path: &Path, error: impl Into<String>) -> Self {
        Self {
            path: path.display().to_string(),
            valid: false,
            format: None,
            dialect: None,
            endpoints: 0,
            models: 0,
            error: Some(error.into()),
        }
    }
}

/// Validate a single file without printing anything.
#[must_use]
pub fn validate_file(path: &Path) -> ValidationOutcome {
    let content = match read_spec_file(path) {
        Ok(content) => content,
        Err(e) => return ValidationOutcome::invalid(path, e.full_message()),
    };
    if !looks_like_spec(&content) {
        return ValidationOutcome::invalid(path, "not an OpenAPI/Swagger document");
    }
    match parse_spec_str(&content) {
        Ok(doc) => ValidationOutcome {
            path: path.display().to_string(),
            valid: true,
            format: detect_format(&content).map(|f| f.name().to_string()),
            dialect: Some(doc.dialect.to_string()),
            endpoints: doc.endpoint_count(),
            models: doc.model_count(),
            error: None,
        },
        Err(e) => ValidationOutcome::invalid(path, e.full_message()),
    }
}

/// Run the validate command, returning the desired exit code.
#[allow(clippy::needless_pass_by_value)]
pub fn run_validate(
    paths: Vec<PathBuf>,
    output: ReportFormat,
    output_file: Option<PathBuf>,
    quiet: bool,
) -> Result<i32> {
    let outcomes: Vec<ValidationOutcome> = paths.iter().map(|p| validate_file(p)).collect();
    let invalid = outcomes.iter().filter(|o| !o.valid).count();
    if invalid > 0 && !quiet {
        tracing::warn!("{} of {} files failed validation", invalid, outcomes.len());
    }

    let content = match output {
        ReportFormat::Json => serde_json::to_string_pretty(&outcomes)
            .map_err(|e| anyhow::anyhow!("Failed to serialize validation results: {e}"))?,
        _ => format_outcomes_text(&outcomes),
    };
    write_output(&content, &OutputTarget::from_option(output_file), quiet)?;

    Ok(if invalid == 0 {
        exit_codes::SUCCESS
    } else {
        exit_codes::INVALID_INPUT
    })
}

fn format_outcomes_text(outcomes: &[ValidationOutcome]) -> String {
    outcomes
        .iter()
        .map(|o| {
            if o.valid {
                format!(
                    "✓ {}: {} ({}), {} endpoints, {} models",
                    o.path,
                    o.dialect.as_deref().unwrap_or("unknown"),
                    o.format.as_deref().unwrap_or("?"),
                    o.endpoints,
                    o.models
                )
            } else {
                format!("✗ {}: {}", o.path, o.error.as_deref().unwrap_or("invalid"))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
