//! Unified error types for oas-compare.
//!
//! Parsing is the only stage that can fail. Everything below it (extraction,
//! diffing, classification) works on already-parsed trees and defaults absent
//! fields, so the diff engine itself never returns an error.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for oas-compare operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum OasCompareError {
    /// Errors while turning raw text into a specification tree
    #[error("Failed to parse specification: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific parse error kinds
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// Text is neither YAML carrying an `openapi:`/`swagger:` marker nor a JSON object
    #[error("Unsupported file format - expected OpenAPI/Swagger YAML or a JSON object")]
    UnsupportedFormat,

    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),

    /// The text parsed, but the root is null, false or empty
    #[error("Document is empty")]
    EmptyDocument,
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for oas-compare operations
pub type Result<T> = std::result::Result<T, OasCompareError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl OasCompareError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error for text that matches no supported format
    pub fn unsupported_format(context: impl Into<String>) -> Self {
        Self::parse(context, ParseErrorKind::UnsupportedFormat)
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// The parse failure kind, if this is a parse error.
    #[must_use]
    pub const fn parse_kind(&self) -> Option<&ParseErrorKind> {
        match self {
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Render this error and every `source()` below it as one line.
    ///
    /// `Display` on the outer error only shows the context; callers that
    /// surface a plain string (such as a failed comparison result) need the
    /// underlying parser message too.
    #[must_use]
    pub fn full_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            message.push_str(": ");
            message.push_str(&err.to_string());
            source = err.source();
        }
        message
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for OasCompareError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for OasCompareError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<serde_yaml::Error> for OasCompareError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::parse(
            "YAML deserialization",
            ParseErrorKind::InvalidYaml(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained outermost-first, so a failure deep in the
/// parser reads like "base specification 'v1': JSON deserialization".
///
/// # Example
///
/// ```ignore
/// use oas_compare::error::ErrorContext;
///
/// let doc = parse_spec_str(&content)
///     .with_context(|| format!("base specification '{}'", file.version))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<OasCompareError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: OasCompareError, new_ctx: &str) -> OasCompareError {
    match err {
        OasCompareError::Parse {
            context: existing,
            source,
        } => OasCompareError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        OasCompareError::Io {
            path,
            message,
            source,
        } => OasCompareError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        OasCompareError::Validation(msg) => {
            OasCompareError::Validation(chain_context(new_ctx, &msg))
        }
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
