//! Specification diff engine implementation.

use super::changes::{ModelChangeComputer, OperationChangeComputer};
use super::traits::ChangeComputer;
use super::{ComparisonResult, SpecDetails};
use crate::model::SpecDocument;
use crate::utils::hashes_match;

/// Diff engine comparing two parsed specification documents.
///
/// The engine is pure: it holds only its settings, never caches documents
/// and never fails. One engine can serve any number of comparisons,
/// including concurrent ones.
#[derive(Debug, Clone)]
pub struct DiffEngine {
    report_method_changes: bool,
    skip_identical: bool,
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffEngine {
    /// Create a new diff engine with default settings
    #[must_use]
    pub const fn new() -> Self {
        Self {
            report_method_changes: false,
            skip_identical: true,
        }
    }

    /// Report methods added to or removed from paths present on both sides.
    #[must_use]
    pub const fn with_method_level_changes(mut self, enabled: bool) -> Self {
        self.report_method_changes = enabled;
        self
    }

    /// Return no changes without diffing when both source texts hash equal.
    #[must_use]
    pub const fn skip_identical(mut self, enabled: bool) -> Self {
        self.skip_identical = enabled;
        self
    }

    /// Check if method-level changes are reported
    #[must_use]
    pub const fn method_level_changes_enabled(&self) -> bool {
        self.report_method_changes
    }

    /// Compare two documents and return the classified result.
    pub fn diff(&self, base: &SpecDocument, target: &SpecDocument) -> ComparisonResult {
        let details = SpecDetails {
            base_endpoints: base.endpoint_count(),
            target_endpoints: target.endpoint_count(),
            base_models: base.model_count(),
            target_models: target.model_count(),
        };

        // Quick check: if content hashes match, the documents are identical
        if self.skip_identical && hashes_match(base.content_hash, target.content_hash) {
            tracing::debug!("Source texts are identical, skipping diff");
            return ComparisonResult::from_changes(Vec::new(), details);
        }

        let operations =
            OperationChangeComputer::new().with_method_level_changes(self.report_method_changes);
        let models = ModelChangeComputer::new();
        let computers: [&dyn ChangeComputer; 2] = [&operations, &models];

        let mut changes = Vec::new();
        for computer in computers {
            let computed = computer.compute(base, target);
            tracing::debug!("{} computer found {} changes", computer.name(), computed.len());
            changes.extend(computed);
        }

        ComparisonResult::from_changes(changes, details)
    }
}
