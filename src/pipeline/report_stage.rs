//! Report output stage.

use super::{auto_detect_format, should_use_color, write_output, Comparison, OutputTarget};
use crate::config::DiffConfig;
use crate::reports::{create_reporter_with_options, ReportConfig, ReportMetadata};
use anyhow::Result;

/// Render the comparison in the configured format and write it to the
/// configured destination.
pub fn output_report(config: &DiffConfig, comparison: &Comparison) -> Result<()> {
    let output_target = OutputTarget::from_option(config.output.file.clone());
    let effective_output = auto_detect_format(config.output.format, &output_target);

    let report_config = ReportConfig::default()
        .with_metadata(ReportMetadata::new().with_comparison(comparison.metadata.clone()));

    let use_color = should_use_color(config.output.no_color, &output_target);
    let reporter = create_reporter_with_options(effective_output, use_color);
    tracing::debug!("Rendering {} report", reporter.format());
    let report = reporter.generate(&comparison.result, &report_config)?;

    write_output(&report, &output_target, config.behavior.quiet)
}
