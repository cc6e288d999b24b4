//! Content sniffing for specification documents.
//!
//! Detection is purely textual and runs before any parser sees the input:
//!
//! 1. trimmed text containing `openapi:` or `swagger:` anywhere is YAML;
//! 2. otherwise trimmed text starting with `{` is JSON;
//! 3. anything else is unsupported.
//!
//! The YAML rule wins even for JSON-looking text, so a JSON document whose
//! string values happen to contain `openapi:` goes through the YAML parser
//! (which accepts JSON flow syntax anyway).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Markers that identify YAML-dialect specification text.
pub const YAML_MARKERS: [&str; 2] = ["openapi:", "swagger:"];

/// Source text format of a specification document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecFormat {
    Yaml,
    Json,
}

impl SpecFormat {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Json => "JSON",
        }
    }
}

impl fmt::Display for SpecFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Detect the source format of raw specification text.
///
/// Returns `None` when the text matches neither rule.
#[must_use]
pub fn detect_format(content: &str) -> Option<SpecFormat> {
    let trimmed = content.trim();
    if has_yaml_marker(trimmed) {
        Some(SpecFormat::Yaml)
    } else if trimmed.starts_with('{') {
        Some(SpecFormat::Json)
    } else {
        tracing::debug!(
            "Format detection failed: no openapi:/swagger: marker and no leading '{{' ({} bytes)",
            trimmed.len()
        );
        None
    }
}

/// Whether the text carries a YAML version marker.
#[must_use]
pub fn has_yaml_marker(content: &str) -> bool {
    YAML_MARKERS.iter().any(|marker| content.contains(marker))
}
