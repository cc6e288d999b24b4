//! Trait definitions for diff computation strategies.

use super::ApiChange;
use crate::model::SpecDocument;

/// Changes produced by one computer, in detection order.
pub type ChangeList = Vec<ApiChange>;

/// Trait for computing one category of changes between two documents.
///
/// Computers are independent of each other; the engine runs them in a fixed
/// order and concatenates their output.
pub trait ChangeComputer: Send + Sync {
    /// Compute changes from `base` to `target`.
    fn compute(&self, base: &SpecDocument, target: &SpecDocument) -> ChangeList;

    /// Get the name of this change computer for logging/debugging.
    fn name(&self) -> &str;
}
