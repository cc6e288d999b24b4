//! Diff command handler.
//!
//! Implements the `diff` subcommand for comparing two specifications.

use crate::config::DiffConfig;
use crate::diff::ComparisonResult;
use crate::pipeline::{compute_comparison, exit_codes, load_spec_pair, output_report};
use anyhow::Result;

/// Run the diff command, returning the desired exit code.
///
/// A comparison that fails to parse either side is still reported (the
/// report carries the error) and yields [`exit_codes::ERROR`].
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff(config: DiffConfig) -> Result<i32> {
    let quiet = config.behavior.quiet;

    let (base, target) = load_spec_pair(&config)?;
    if !quiet {
        tracing::info!(
            "Loaded {} ({} bytes) and {} ({} bytes)",
            base.path,
            base.content.len(),
            target.path,
            target.content.len()
        );
    }

    let comparison = compute_comparison(&config, &base, &target);
    let exit_code = determine_exit_code(&config, &comparison.result);

    output_report(&config, &comparison)?;

    Ok(exit_code)
}

/// Determine the appropriate exit code based on the result and config flags.
fn determine_exit_code(config: &DiffConfig, result: &ComparisonResult) -> i32 {
    if !result.success {
        return exit_codes::ERROR;
    }
    if let (Some(threshold), Some(max)) = (config.behavior.fail_on_severity, result.max_severity()) {
        if max >= threshold {
            return exit_codes::SEVERITY_THRESHOLD;
        }
    }
    if config.behavior.fail_on_change && result.has_changes() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}
