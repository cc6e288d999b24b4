//! Change computer implementations.
//!
//! One `ChangeComputer` per concern: endpoints (including the per-operation
//! parameter / response / request-body diff) and named models.

mod models;
mod operation_pair;
mod operations;

pub use models::{analyze_model_changes, ModelChangeComputer};
pub use operation_pair::diff_operation_pair;
pub use operations::OperationChangeComputer;
