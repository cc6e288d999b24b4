//! Pipeline orchestration for specification comparisons.
//!
//! This module provides shared orchestration logic for load → compare → report
//! workflows, reducing duplication across CLI command handlers. The
//! [`compare`] family is the programmatic entry point; it takes raw texts and
//! never touches the filesystem.

mod compare;
mod diff_stage;
mod output;
mod parse;
mod report_stage;

pub use compare::{compare, compare_detailed, compare_with, Comparison, SpecFile};
pub use diff_stage::compute_comparison;
pub use output::{auto_detect_format, should_use_color, write_output, OutputTarget};
pub use parse::{load_spec_file, load_spec_pair};
pub use report_stage::output_report;

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no changes detected, or no failure flag set
    pub const SUCCESS: i32 = 0;
    /// Changes were detected (with `--fail-on-change`)
    pub const CHANGES_DETECTED: i32 = 1;
    /// `validate` / `discover`: an input is not a specification, or nothing was found
    pub const INVALID_INPUT: i32 = 1;
    /// A change at or above the `--fail-on-severity` threshold
    pub const SEVERITY_THRESHOLD: i32 = 2;
    /// An error occurred, including a failed comparison
    pub const ERROR: i32 = 3;
}
