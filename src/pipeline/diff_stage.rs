//! Diff computation stage.
//!
//! Builds the engine from the configured settings and runs the comparison.

use super::{compare_detailed, Comparison, SpecFile};
use crate::config::DiffConfig;

/// Run the comparison between two loaded specifications.
pub fn compute_comparison(config: &DiffConfig, base: &SpecFile, target: &SpecFile) -> Comparison {
    let engine = config.diff.engine();
    if config.diff.report_method_changes && !config.behavior.quiet {
        tracing::info!("Method-level changes within shared paths enabled");
    }

    let comparison = compare_detailed(&engine, base, target);

    if !config.behavior.quiet {
        if let Some(severity) = comparison.result.max_severity() {
            tracing::info!("Highest change severity: {}", severity);
        }
    }
    comparison
}
