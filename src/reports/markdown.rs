//! Markdown report generator.

use super::escape::{code_span, escape_markdown_list, escape_markdown_table};
use super::{
    visible_changes, ReportConfig, ReportError, ReportFormat, ReportGenerator, SpecSideMetadata,
};
use crate::diff::{ApiChange, ChangeSummary, ComparisonResult, MODEL_ID_PREFIX};
use std::fmt::Write;

/// Markdown report generator
///
/// Sections: summary table, operation changes, parameter and response
/// changes (the ones in neither partition), model changes with their
/// structural breakdown.
pub struct MarkdownReporter {
    /// Include the per-model bullet lists
    include_model_details: bool,
}

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_model_details: true,
        }
    }

    /// Toggle the per-model bullet lists
    #[must_use]
    pub const fn with_model_details(mut self, enabled: bool) -> Self {
        self.include_model_details = enabled;
        self
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_side(md: &mut String, label: &str, side: &SpecSideMetadata) -> std::fmt::Result {
    write!(
        md,
        "- **{label}:** {} ({}",
        escape_markdown_table(side.label()),
        code_span(&side.path)
    )?;
    if !side.commit_hash.is_empty() {
        write!(md, ", commit {}", code_span(&side.commit_hash))?;
    }
    write!(md, ", {}", side.commit_date.format("%Y-%m-%d %H:%M UTC"))?;
    if let Some(dialect) = &side.dialect {
        write!(md, ", {dialect}")?;
    }
    writeln!(md, ")")
}

fn summary_row(md: &mut String, scope: &str, summary: &ChangeSummary) -> std::fmt::Result {
    writeln!(
        md,
        "| {scope} | {} | {} | {} | {} |",
        summary.total, summary.new, summary.changed, summary.deprecated
    )
}

fn model_name(change: &ApiChange) -> &str {
    change
        .operation_id
        .strip_prefix(MODEL_ID_PREFIX)
        .unwrap_or(&change.operation_id)
}

impl ReportGenerator for MarkdownReporter {
    fn generate(
        &self,
        result: &ComparisonResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut md = String::new();
        let title = config.title.as_deref().unwrap_or("API Specification Changes");
        writeln!(md, "# {}", escape_markdown_list(title))?;
        writeln!(md)?;

        if let Some(comparison) = &config.metadata.comparison {
            write_side(&mut md, "Base", &comparison.base)?;
            write_side(&mut md, "Target", &comparison.target)?;
            writeln!(md)?;
        }

        if !result.success {
            writeln!(
                md,
                "> **Comparison failed:** {}",
                escape_markdown_list(result.error.as_deref().unwrap_or("unknown error"))
            )?;
            return Ok(md);
        }

        // Summary
        let summary = &result.summary;
        writeln!(md, "## Summary")?;
        writeln!(md)?;
        writeln!(md, "| Scope | Total | New | Changed | Deprecated |")?;
        writeln!(md, "|-------|-------|-----|---------|------------|")?;
        writeln!(
            md,
            "| All | {} | {} | {} | {} |",
            summary.total, summary.new, summary.changed, summary.deprecated
        )?;
        summary_row(&mut md, "Operations", &summary.operations)?;
        summary_row(&mut md, "Models", &summary.models)?;
        writeln!(md)?;

        if let Some(details) = &result.details {
            writeln!(
                md,
                "Endpoints: {} → {}. Models: {} → {}.",
                details.base_endpoints,
                details.target_endpoints,
                details.base_models,
                details.target_models
            )?;
            writeln!(md)?;
        }

        // Operation changes
        let operations: Vec<_> = visible_changes(&result.operation_changes, config).collect();
        if !operations.is_empty() {
            writeln!(md, "## Operation Changes")?;
            writeln!(md)?;
            writeln!(md, "| Severity | Type | Method | Path | Operation | Description |")?;
            writeln!(md, "|----------|------|--------|------|-----------|-------------|")?;
            for change in operations {
                writeln!(
                    md,
                    "| {} | {} | {} | {} | {} | {} |",
                    change.severity,
                    change.change_type,
                    change.method,
                    code_span(&change.path),
                    escape_markdown_table(&change.operation_id),
                    escape_markdown_table(&change.description)
                )?;
            }
            writeln!(md)?;
        }

        // Parameter / response changes land in neither partition
        let unpartitioned: Vec<_> = result
            .changes
            .iter()
            .filter(|c| !c.is_operation_change() && !c.is_model_change())
            .filter(|c| config.includes(c.severity))
            .take(config.max_items.unwrap_or(usize::MAX))
            .collect();
        if !unpartitioned.is_empty() {
            writeln!(md, "## Parameter and Response Changes")?;
            writeln!(md)?;
            writeln!(md, "| Severity | Operation | Description |")?;
            writeln!(md, "|----------|-----------|-------------|")?;
            for change in unpartitioned {
                writeln!(
                    md,
                    "| {} | {} | {} |",
                    change.severity,
                    escape_markdown_table(&change.operation_id),
                    escape_markdown_table(&change.description)
                )?;
            }
            writeln!(md)?;
        }

        // Model changes
        let models: Vec<_> = visible_changes(&result.model_changes, config).collect();
        if !models.is_empty() {
            writeln!(md, "## Model Changes")?;
            writeln!(md)?;
            writeln!(md, "| Severity | Type | Model | Description |")?;
            writeln!(md, "|----------|------|-------|-------------|")?;
            for change in &models {
                writeln!(
                    md,
                    "| {} | {} | {} | {} |",
                    change.severity,
                    change.change_type,
                    escape_markdown_table(model_name(change)),
                    escape_markdown_table(&change.description)
                )?;
            }
            writeln!(md)?;

            if self.include_model_details {
                for change in &models {
                    let Some(details) = &change.details else {
                        continue;
                    };
                    if details.changes.is_empty() {
                        continue;
                    }
                    writeln!(md, "### {}", escape_markdown_list(&details.model_name))?;
                    writeln!(md)?;
                    for line in &details.changes {
                        writeln!(md, "- {}", escape_markdown_list(line))?;
                    }
                    writeln!(md)?;
                }
            }
        }

        if summary.total == 0 {
            writeln!(md, "No changes detected.")?;
        }

        Ok(md)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }
}
