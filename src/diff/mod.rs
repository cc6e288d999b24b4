//! Structural diff engine for API specifications.
//!
//! # Architecture
//!
//! The diff system is built on traits for extensibility:
//!
//! - [`ChangeComputer`](traits::ChangeComputer): Trait for computing one category of changes
//! - Individual change computers in the [`changes`] module (operations, models)
//! - [`equality::values_equal`] for key-order-independent tree comparison
//!
//! # Example
//!
//! ```
//! use oas_compare::diff::DiffEngine;
//! use oas_compare::parsers::parse_spec_str;
//!
//! let base = parse_spec_str(r#"{"openapi": "3.0.0", "paths": {}}"#).unwrap();
//! let target = parse_spec_str(
//!     r#"{"openapi": "3.0.0", "paths": {"/ping": {"get": {"operationId": "ping"}}}}"#,
//! )
//! .unwrap();
//!
//! let result = DiffEngine::new().diff(&base, &target);
//! assert_eq!(result.summary.new, 1);
//! assert_eq!(result.operation_changes[0].operation_id, "ping");
//! ```

pub mod changes;
mod engine;
pub mod equality;
mod result;
pub mod traits;

pub use engine::DiffEngine;
pub use result::{
    partition_changes, ApiChange, ChangeSummary, ChangeType, ComparisonResult,
    ComparisonSummary, ModelChangeDetails, Severity, SpecDetails, MODEL_ID_PREFIX,
    NOT_APPLICABLE,
};
pub use traits::{ChangeComputer, ChangeList};
