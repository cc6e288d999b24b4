//! Comparison orchestration.
//!
//! Turns two raw specification texts into a [`ComparisonResult`]. Parsing is
//! the only fallible step; any parse failure becomes a `success = false`
//! result whose error names the side that failed. Nothing here touches the
//! filesystem.

use crate::diff::{ComparisonResult, DiffEngine};
use crate::error::{ErrorContext, Result};
use crate::model::{SpecDialect, SpecDocument};
use crate::parsers::parse_spec_str;
use crate::reports::{ComparisonMetadata, SpecSideMetadata};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One input document plus caller bookkeeping.
///
/// Only `content` is examined by the comparison; the other fields are
/// echoed into [`ComparisonMetadata`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecFile {
    pub path: String,
    /// Raw YAML or JSON text
    pub content: String,
    /// Version label, e.g. a release tag
    pub version: String,
    pub commit_hash: String,
    pub commit_date: DateTime<Utc>,
}

impl SpecFile {
    /// A document with the path as its version label and no commit info.
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            version: path.clone(),
            path,
            content: content.into(),
            commit_hash: String::new(),
            commit_date: DateTime::<Utc>::default(),
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    #[must_use]
    pub fn with_commit(mut self, hash: impl Into<String>, date: DateTime<Utc>) -> Self {
        self.commit_hash = hash.into();
        self.commit_date = date;
        self
    }

    /// Report metadata for this side.
    #[must_use]
    pub fn metadata(&self, dialect: Option<SpecDialect>) -> SpecSideMetadata {
        SpecSideMetadata {
            path: self.path.clone(),
            version: self.version.clone(),
            commit_hash: self.commit_hash.clone(),
            commit_date: self.commit_date,
            dialect,
        }
    }

    fn parse(&self, side: &str) -> Result<SpecDocument> {
        parse_spec_str(&self.content)
            .with_context(|| format!("{side} specification '{}' ({})", self.version, self.path))
    }
}

/// A comparison result together with the metadata of both inputs.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub result: ComparisonResult,
    pub metadata: ComparisonMetadata,
}

/// Compare two documents with the default engine settings.
pub fn compare(base: &SpecFile, target: &SpecFile) -> ComparisonResult {
    compare_with(&DiffEngine::new(), base, target)
}

/// Compare two documents with a configured engine.
pub fn compare_with(engine: &DiffEngine, base: &SpecFile, target: &SpecFile) -> ComparisonResult {
    compare_detailed(engine, base, target).result
}

/// Compare two documents and keep the input metadata for reporting.
///
/// Runs entirely on the calling thread: base is parsed, then target, then
/// the two are diffed.
pub fn compare_detailed(engine: &DiffEngine, base: &SpecFile, target: &SpecFile) -> Comparison {
    tracing::info!("Comparing {} -> {}", base.version, target.version);

    let base_doc = base.parse("base");
    let target_doc = target.parse("target");

    let metadata = ComparisonMetadata {
        base: base.metadata(base_doc.as_ref().ok().map(|d| d.dialect.clone())),
        target: target.metadata(target_doc.as_ref().ok().map(|d| d.dialect.clone())),
    };

    let result = match (base_doc, target_doc) {
        (Ok(base_doc), Ok(target_doc)) => {
            tracing::debug!(
                "Parsed {} ({} endpoints) and {} ({} endpoints)",
                base_doc.dialect,
                base_doc.endpoint_count(),
                target_doc.dialect,
                target_doc.endpoint_count()
            );
            engine.diff(&base_doc, &target_doc)
        }
        (Err(e), _) | (_, Err(e)) => {
            let message = e.full_message();
            tracing::warn!("{}", message);
            ComparisonResult::failure(message)
        }
    };

    if result.success {
        tracing::info!(
            "Found {} changes ({} operations, {} models)",
            result.summary.total,
            result.summary.operations.total,
            result.summary.models.total
        );
    }

    Comparison { result, metadata }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::ChangeType;

    const V1: &str = "openapi: 3.0.0\npaths:\n  /ping:\n    get:\n      operationId: ping\n";
    const V2: &str = "openapi: 3.0.0\npaths: {}\n";

    #[test]
    fn test_compare_success() {
        let base = SpecFile::new("openapi.yaml", V1).with_version("v1");
        let target = SpecFile::new("openapi.yaml", V2).with_version("v2");
        let result = compare(&base, &target);
        assert!(result.success);
        assert_eq!(result.summary.deprecated, 1);
        assert_eq!(result.changes[0].change_type, ChangeType::Deprecated);
    }

    #[test]
    fn test_failure_names_the_side() {
        let base = SpecFile::new("openapi.yaml", V1).with_version("v1");
        let target = SpecFile::new("broken.txt", "not json or yaml").with_version("v2");
        let result = compare(&base, &target);
        assert!(!result.success);
        let error = result.error.unwrap();
        assert!(error.contains("target specification 'v2' (broken.txt)"), "{error}");
        assert!(error.contains("Unsupported file format"), "{error}");
        assert!(result.details.is_none());
    }

    #[test]
    fn test_base_failure_reported_first() {
        let base = SpecFile::new("a.json", "{").with_version("v1");
        let target = SpecFile::new("b.json", "[]").with_version("v2");
        let error = compare(&base, &target).error.unwrap();
        assert!(error.contains("base specification 'v1'"), "{error}");
    }

    #[test]
    fn test_metadata_carries_dialects() {
        let base = SpecFile::new("swagger.json", r#"{"swagger": "2.0"}"#)
            .with_commit("abc", DateTime::<Utc>::default());
        let target = SpecFile::new("openapi.yaml", "not a spec");
        let comparison = compare_detailed(&DiffEngine::new(), &base, &target);

        assert_eq!(comparison.metadata.base.dialect, Some(SpecDialect::Swagger("2.0".to_string())));
        assert_eq!(comparison.metadata.base.commit_hash, "abc");
        assert_eq!(comparison.metadata.target.dialect, None);
        assert_eq!(comparison.metadata.target.version, "openapi.yaml");
    }
}
