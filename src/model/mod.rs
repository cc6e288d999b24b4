//! In-memory representation of parsed specification documents.
//!
//! Raw documents stay as untyped [`serde_json::Value`] trees; [`SpecDocument`]
//! is the typed extraction the diff engine works on: path -> method ->
//! [`Operation`], plus the merged name -> schema model map from both
//! `definitions` (2.x) and `components.schemas` (3.x).
//!
//! ```
//! use oas_compare::model::{HttpMethod, SpecDocument};
//! use serde_json::json;
//!
//! let doc = SpecDocument::from_value(&json!({
//!     "openapi": "3.0.0",
//!     "paths": {"/users": {"get": {"operationId": "listUsers"}}}
//! }));
//! assert_eq!(doc.endpoint_count(), 1);
//! assert!(doc.paths["/users"].operations.contains_key(&HttpMethod::Get));
//! ```

mod document;
pub mod node;

pub use document::*;
pub use node::{display_value, is_truthy, yaml_to_value};
