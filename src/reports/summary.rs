//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{visible_changes, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{ChangeSummary, ComparisonResult, Severity};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "red",
        Severity::Medium => "yellow",
        Severity::Low => "green",
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn partition_line(&self, label: &str, summary: &ChangeSummary) -> String {
        format!(
            "  {:<11} {} total ({} new, {} changed, {} deprecated)",
            self.color(label, "cyan"),
            summary.total,
            summary.new,
            summary.changed,
            summary.deprecated
        )
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(
        &self,
        result: &ComparisonResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        // Header
        let title = config.title.as_deref().unwrap_or("API Spec Comparison");
        lines.push(self.color(title, "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        if let Some(comparison) = &config.metadata.comparison {
            lines.push(format!(
                "{}  {} → {}",
                self.color("Versions:", "cyan"),
                comparison.base.label(),
                comparison.target.label()
            ));
            if let (Some(base), Some(target)) = (&comparison.base.dialect, &comparison.target.dialect) {
                lines.push(format!("{}  {base} → {target}", self.color("Format:", "cyan")));
            }
        }

        if !result.success {
            lines.push(String::new());
            lines.push(format!(
                "{} {}",
                self.color("Comparison failed:", "red"),
                result.error.as_deref().unwrap_or("unknown error")
            ));
            return Ok(lines.join("\n"));
        }

        if let Some(details) = &result.details {
            lines.push(format!(
                "{}  {} → {} endpoints, {} → {} models",
                self.color("Size:", "cyan"),
                details.base_endpoints,
                details.target_endpoints,
                details.base_models,
                details.target_models
            ));
        }

        lines.push(String::new());
        lines.push(self.color("Changes:", "bold"));

        let summary = &result.summary;
        if summary.new > 0 {
            lines.push(format!("  {} new", self.color(&format!("+{}", summary.new), "green")));
        }
        if summary.changed > 0 {
            lines.push(format!(
                "  {} changed",
                self.color(&format!("~{}", summary.changed), "yellow")
            ));
        }
        if summary.deprecated > 0 {
            lines.push(format!(
                "  {} deprecated",
                self.color(&format!("-{}", summary.deprecated), "red")
            ));
        }
        if summary.total == 0 {
            lines.push(format!("  {}", self.color("No changes", "dim")));
            return Ok(lines.join("\n"));
        }

        lines.push(self.partition_line("Operations:", &summary.operations));
        lines.push(self.partition_line("Models:", &summary.models));

        lines.push(String::new());
        for change in visible_changes(&result.changes, config) {
            let severity = format!("{:<6}", change.severity.as_str().to_uppercase());
            lines.push(format!(
                "  {} {:<13} {}  {}",
                self.color(&severity, severity_color(change.severity)),
                change.change_type.as_str(),
                change.operation_id,
                self.color(&change.description, "dim")
            ));
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}
