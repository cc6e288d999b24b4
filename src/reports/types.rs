//! Report type definitions.

use crate::diff::Severity;
use crate::model::SpecDialect;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Auto-detect: summary for terminals and pipes alike
    #[default]
    Auto,
    /// Structured JSON output
    Json,
    /// Brief summary output
    Summary,
    /// Human-readable Markdown
    #[value(alias = "md")]
    Markdown,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Json => write!(f, "json"),
            Self::Summary => write!(f, "summary"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Title for the report
    pub title: Option<String>,
    /// Additional metadata to include
    pub metadata: ReportMetadata,
    /// Maximum changes listed per section
    pub max_items: Option<usize>,
    /// Only list changes at or above this severity
    pub min_severity: Option<Severity>,
}

impl ReportConfig {
    #[must_use]
    pub fn with_metadata(mut self, metadata: ReportMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Whether a change of `severity` passes the `min_severity` filter.
    #[must_use]
    pub fn includes(&self, severity: Severity) -> bool {
        self.min_severity.map_or(true, |min| severity >= min)
    }
}

/// Metadata included in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    /// Tool version
    pub tool_version: String,
    /// Generation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    /// The two inputs of the comparison
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ComparisonMetadata>,
}

impl ReportMetadata {
    pub fn new() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Some(Utc::now().to_rfc3339()),
            comparison: None,
        }
    }

    #[must_use]
    pub fn with_comparison(mut self, comparison: ComparisonMetadata) -> Self {
        self.comparison = Some(comparison);
        self
    }
}

/// Caller bookkeeping for both sides, echoed into reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonMetadata {
    pub base: SpecSideMetadata,
    pub target: SpecSideMetadata,
}

/// Bookkeeping for one input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecSideMetadata {
    pub path: String,
    pub version: String,
    pub commit_hash: String,
    pub commit_date: DateTime<Utc>,
    /// Detected dialect; absent when the document failed to parse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialect: Option<SpecDialect>,
}

impl SpecSideMetadata {
    /// Short label used in report headings: the version, else the path.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.version.is_empty() {
            &self.path
        } else {
            &self.version
        }
    }
}
