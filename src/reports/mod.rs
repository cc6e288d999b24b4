//! Report generation for comparison results.
//!
//! This module provides the output formats for a [`ComparisonResult`]:
//! - JSON: the result itself plus a metadata header, for programmatic use
//! - Summary: compact shell-friendly output with optional color
//! - Markdown: change tables for pull requests and release notes
//!
//! # Security
//!
//! The [`escape`] module provides the escaping helpers. Every string taken
//! from a compared document (paths, operation ids, model names) must be
//! escaped before it is embedded in a Markdown report.

pub mod escape;
mod json;
mod markdown;
mod summary;
mod types;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use summary::SummaryReporter;
pub use types::{ComparisonMetadata, ReportConfig, ReportFormat, ReportMetadata, SpecSideMetadata};

use crate::diff::{ApiChange, ComparisonResult};
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render a comparison result
    fn generate(&self, result: &ComparisonResult, config: &ReportConfig)
        -> Result<String, ReportError>;

    /// Write report to a writer
    fn write_report(
        &self,
        result: &ComparisonResult,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate(result, config)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Auto | ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
    }
}

/// Changes that pass the config's severity filter, capped at `max_items`.
pub(crate) fn visible_changes<'a>(
    changes: &'a [ApiChange],
    config: &'a ReportConfig,
) -> impl Iterator<Item = &'a ApiChange> + 'a {
    changes
        .iter()
        .filter(|c| config.includes(c.severity))
        .take(config.max_items.unwrap_or(usize::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{ChangeType, Severity, SpecDetails};

    fn sample() -> ComparisonResult {
        let changes = vec![
            ApiChange::new("GET /a", ChangeType::New, Severity::Low, "New endpoint: GET /a")
                .scoped("GET", "/a")
                .with_new_path("/a"),
            ApiChange::new("GET /b", ChangeType::Deprecated, Severity::High, "Removed endpoint: GET /b")
                .scoped("GET", "/b")
                .with_old_path("/b"),
        ];
        ComparisonResult::from_changes(changes, SpecDetails::default())
    }

    #[test]
    fn test_factory_formats() {
        assert_eq!(create_reporter(ReportFormat::Auto).format(), ReportFormat::Summary);
        assert_eq!(create_reporter(ReportFormat::Json).format(), ReportFormat::Json);
        assert_eq!(
            create_reporter_with_options(ReportFormat::Markdown, false).format(),
            ReportFormat::Markdown
        );
    }

    #[test]
    fn test_visible_changes_filters_and_caps() {
        let result = sample();
        let config = ReportConfig {
            min_severity: Some(Severity::Medium),
            ..Default::default()
        };
        let visible: Vec<_> = visible_changes(&result.changes, &config).collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].operation_id, "GET /b");

        let capped = ReportConfig {
            max_items: Some(1),
            ..Default::default()
        };
        assert_eq!(visible_changes(&result.changes, &capped).count(), 1);
    }

    #[test]
    fn test_write_report_to_buffer() {
        let mut buffer = Vec::new();
        JsonReporter::new()
            .write_report(&sample(), &ReportConfig::default(), &mut buffer)
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed["summary"]["total"], 2);
    }
}
