//! **Structural diff of OpenAPI/Swagger specifications.**
//!
//! `oas-compare` compares two releases of an API description and reports what
//! changed between them: new and deprecated operations, changed paths and
//! parameters, and new, removed or reshaped models. It is meant for release
//! notes and CI gates, not for proving compatibility.
//!
//! Both OpenAPI 3.x (`components.schemas`) and Swagger 2.0 (`definitions`)
//! documents are accepted, as JSON or YAML.
//!
//! ## Core Concepts & Modules
//!
//! - **[`parsers`]**: turns raw text into a [`SpecDocument`], an index of
//!   operations by path and method plus the named models.
//! - **[`diff`]**: home of the [`DiffEngine`], which compares two documents and
//!   produces a [`ComparisonResult`] of [`ApiChange`] entries.
//! - **[`pipeline`]**: the programmatic entry point [`compare`] working on
//!   [`SpecFile`] values, plus file loading and report output used by the CLI.
//! - **[`discovery`]**: finds the specification file inside a checkout.
//! - **[`reports`]**: summary, JSON and Markdown renderings of a result.
//! - **[`config`]**: the `.oas-compare.yaml` configuration layer.
//!
//! ## Comparing Two Documents
//!
//! ```
//! use oas_compare::{compare, ChangeType, SpecFile};
//!
//! let base = SpecFile::new(
//!     "v1/openapi.yaml",
//!     "openapi: 3.0.0\npaths:\n  /pets:\n    get:\n      operationId: listPets\n",
//! );
//! let target = SpecFile::new(
//!     "v2/openapi.yaml",
//!     "openapi: 3.0.0\npaths: {}\n",
//! );
//!
//! let result = compare(&base, &target);
//! assert!(result.success);
//! assert_eq!(result.changes.len(), 1);
//! assert_eq!(result.changes[0].change_type, ChangeType::Deprecated);
//! assert_eq!(result.changes[0].old_path.as_deref(), Some("/pets"));
//! ```
//!
//! ## Working with Parsed Documents
//!
//! ```
//! use oas_compare::{parse_spec_str, DiffEngine};
//!
//! let base = parse_spec_str(r#"{"swagger": "2.0", "definitions": {"Pet": {"type": "object"}}}"#)?;
//! let target = parse_spec_str(r#"{"swagger": "2.0", "definitions": {}}"#)?;
//!
//! let result = DiffEngine::new().diff(&base, &target);
//! assert_eq!(result.model_changes.len(), 1);
//! # Ok::<(), oas_compare::OasCompareError>(())
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Variable names like `base`/`target` pairs are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod discovery;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;
pub mod utils;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError, DiffConfig, Validatable};
pub use diff::{ApiChange, ChangeType, ComparisonResult, DiffEngine, Severity};
pub use discovery::DiscoveryConfig;
pub use error::{ErrorContext, OasCompareError, Result};
pub use model::SpecDocument;
pub use parsers::{parse_spec, parse_spec_str};
pub use pipeline::{compare, compare_with, SpecFile};
pub use reports::{ReportFormat, ReportGenerator};
