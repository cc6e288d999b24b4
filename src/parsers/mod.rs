//! OpenAPI / Swagger document parsers.
//!
//! Raw text is sniffed (see [`detect_format`]), parsed into an untyped
//! [`serde_json::Value`] tree and then extracted into a [`SpecDocument`].
//! Only structural parse success is checked; a document with no `paths` and
//! no model container is valid and yields an empty extraction.
//!
//! ## Usage
//!
//! ```no_run
//! use oas_compare::parsers::{detect_format, parse_spec};
//! use std::path::Path;
//!
//! let doc = parse_spec(Path::new("openapi.yaml")).unwrap();
//! println!("{} endpoints, {} models", doc.endpoint_count(), doc.model_count());
//!
//! let content = std::fs::read_to_string("openapi.yaml").unwrap();
//! if let Some(format) = detect_format(&content) {
//!     println!("Detected: {format}");
//! }
//! ```

mod detection;

pub use detection::{detect_format, has_yaml_marker, SpecFormat, YAML_MARKERS};

use crate::error::{ErrorContext, OasCompareError, ParseErrorKind, Result};
use crate::model::node::field;
use crate::model::{is_truthy, yaml_to_value, SpecDocument};
use crate::utils::content_hash;
use serde_json::Value;
use std::path::Path;

/// Maximum specification file size (64 MB).
const MAX_SPEC_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Parse raw text into an untyped document tree.
///
/// Fails with [`ParseErrorKind::UnsupportedFormat`] when sniffing matches
/// nothing, or with the underlying parser message when the chosen parser
/// rejects the text.
pub fn parse_value(content: &str) -> Result<Value> {
    let format = detect_format(content)
        .ok_or_else(|| OasCompareError::unsupported_format("content sniffing"))?;
    tracing::debug!("Parsing specification as {}", format);

    match format {
        SpecFormat::Yaml => {
            let mut yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
            // `<<: *anchor` merge keys stay literal until applied
            yaml.apply_merge()?;
            Ok(yaml_to_value(yaml))
        }
        SpecFormat::Json => Ok(serde_json::from_str(content)?),
    }
}

/// Parse raw text into a [`SpecDocument`].
///
/// A root that parses to null, `false` or an empty scalar fails with
/// [`ParseErrorKind::EmptyDocument`].
pub fn parse_spec_str(content: &str) -> Result<SpecDocument> {
    let root = parse_value(content)?;
    if !is_truthy(&root) {
        return Err(OasCompareError::parse(
            "document root",
            ParseErrorKind::EmptyDocument,
        ));
    }
    Ok(SpecDocument::from_value(&root).with_content_hash(content_hash(content)))
}

/// Read and parse a specification file.
///
/// Returns an error if the file exceeds [`MAX_SPEC_FILE_SIZE`].
pub fn parse_spec(path: &Path) -> Result<SpecDocument> {
    let content = read_spec_file(path)?;
    parse_spec_str(&content).with_context(|| path.display().to_string())
}

/// Read a specification file into memory, enforcing the size limit.
pub fn read_spec_file(path: &Path) -> Result<String> {
    let metadata = std::fs::metadata(path).map_err(|e| OasCompareError::io(path, e))?;
    if metadata.len() > MAX_SPEC_FILE_SIZE {
        return Err(OasCompareError::validation(format!(
            "{} is {} MB, exceeding the {} MB limit",
            path.display(),
            metadata.len() / (1024 * 1024),
            MAX_SPEC_FILE_SIZE / (1024 * 1024),
        )));
    }
    std::fs::read_to_string(path).map_err(|e| OasCompareError::io(path, e))
}

/// Whether raw text looks like an OpenAPI/Swagger document.
///
/// YAML text qualifies by carrying an `openapi:`/`swagger:` marker. JSON text
/// must parse and carry a non-empty `openapi` or `swagger` field at the root.
#[must_use]
pub fn looks_like_spec(content: &str) -> bool {
    match detect_format(content) {
        Some(SpecFormat::Yaml) => true,
        Some(SpecFormat::Json) => serde_json::from_str::<Value>(content)
            .map(|root| field(&root, "openapi").is_some() || field(&root, "swagger").is_some())
            .unwrap_or(false),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SpecDialect;

    #[test]
    fn test_parse_yaml_document() {
        let content = "openapi: 3.0.0\npaths:\n  /ping:\n    get:\n      responses:\n        200:\n          description: ok\n";
        let doc = parse_spec_str(content).unwrap();
        assert_eq!(doc.endpoint_count(), 1);
        assert_eq!(doc.dialect, SpecDialect::OpenApi("3.0.0".to_string()));
        assert_ne!(doc.content_hash, 0);
    }

    #[test]
    fn test_parse_json_document() {
        let content = r#"{"swagger": "2.0", "definitions": {"User": {"type": "object"}}}"#;
        let doc = parse_spec_str(content).unwrap();
        assert_eq!(doc.model_count(), 1);
        assert_eq!(doc.endpoint_count(), 0);
    }

    #[test]
    fn test_unsupported_format() {
        let err = parse_spec_str("not json or yaml").unwrap_err();
        assert_eq!(err.parse_kind(), Some(&ParseErrorKind::UnsupportedFormat));
    }

    #[test]
    fn test_yaml_merge_keys_are_expanded() {
        let content = "openapi: 3.0.0
x-common:
  query: &query
    in: query
    schema:
      type: string
paths:
  /search:
    get:
      parameters:
        - <<: *query
          name: q
      responses:
        200:
          description: ok
";
        let doc = parse_spec_str(content).unwrap();
        let op = &doc.paths["/search"].operations[&crate::model::HttpMethod::Get];
        let params = op.parameters.as_ref().unwrap();
        assert_eq!(params[0].key(), (Some("q"), Some("query")));
        assert!(params[0].raw.get("<<").is_none());
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_spec_str(r#"{"info": "#).unwrap_err();
        assert!(matches!(err.parse_kind(), Some(ParseErrorKind::InvalidJson(_))));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = parse_spec_str("openapi: 3.0.0\npaths: [unclosed\n").unwrap_err();
        assert!(matches!(err.parse_kind(), Some(ParseErrorKind::InvalidYaml(_))));
    }

    #[test]
    fn test_minimal_document_is_empty_not_error() {
        let doc = parse_spec_str(r#"{"openapi":"3.0.0","info":{}}"#).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_empty_json_object_is_accepted() {
        let doc = parse_spec_str("{}").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_looks_like_spec() {
        assert!(looks_like_spec("openapi: 3.1.0\n"));
        assert!(looks_like_spec(r#"{"swagger": "2.0"}"#));
        assert!(!looks_like_spec(r#"{"name": "package.json"}"#));
        assert!(!looks_like_spec(r#"{"openapi": ""}"#));
        assert!(!looks_like_spec("plain text"));
        assert!(!looks_like_spec("{ broken"));
    }

    #[test]
    fn test_parse_spec_missing_file() {
        let err = parse_spec(Path::new("/definitely/not/here/openapi.yaml")).unwrap_err();
        assert!(matches!(err, OasCompareError::Io { .. }));
    }
}
