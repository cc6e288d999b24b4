//! Parsed specification document and its operation/model extraction.

use super::node::{field, is_truthy, object_field, str_field};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// HTTP methods that identify an operation under a path item.
///
/// Any other key on a path item (`parameters`, `summary`, `servers`, vendor
/// extensions) is not an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    /// All recognised methods, in canonical order.
    pub const ALL: [Self; 7] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Delete,
        Self::Patch,
        Self::Head,
        Self::Options,
    ];

    /// Parse a path-item key, case-insensitively.
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_lower().eq_ignore_ascii_case(key))
    }

    /// Whether a path-item key names an operation.
    #[must_use]
    pub fn is_valid(key: &str) -> bool {
        Self::parse(key).is_some()
    }

    /// Lowercase form, as written in specification documents.
    #[must_use]
    pub const fn as_lower(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
            Self::Patch => "patch",
            Self::Head => "head",
            Self::Options => "options",
        }
    }

    /// Uppercase form, as reported in changes.
    #[must_use]
    pub const fn as_upper(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_upper())
    }
}

/// Specification dialect, detected from the root version marker.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "dialect", content = "version", rename_all = "lowercase")]
pub enum SpecDialect {
    /// Swagger 2.x (`swagger: "2.0"`, models under `definitions`)
    Swagger(String),
    /// OpenAPI 3.x (`openapi: 3.x.y`, models under `components.schemas`)
    OpenApi(String),
    /// No version marker
    #[default]
    Unknown,
}

impl SpecDialect {
    /// Detect the dialect from a document root.
    #[must_use]
    pub fn detect(root: &Value) -> Self {
        if let Some(version) = field(root, "openapi") {
            Self::OpenApi(version_string(version))
        } else if let Some(version) = field(root, "swagger") {
            Self::Swagger(version_string(version))
        } else {
            Self::Unknown
        }
    }
}

fn version_string(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), ToString::to_string)
}

impl fmt::Display for SpecDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Swagger(v) => write!(f, "Swagger {v}"),
            Self::OpenApi(v) => write!(f, "OpenAPI {v}"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// One parameter of an operation, keyed by `(name, in)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: Option<String>,
    pub location: Option<String>,
    /// The full parameter object, used for deep comparison and reporting
    pub raw: Value,
}

impl Parameter {
    fn from_value(raw: &Value) -> Self {
        Self {
            name: raw.get("name").and_then(Value::as_str).map(str::to_string),
            location: raw.get("in").and_then(Value::as_str).map(str::to_string),
            raw: raw.clone(),
        }
    }

    /// Identity of this parameter within its operation.
    #[must_use]
    pub fn key(&self) -> (Option<&str>, Option<&str>) {
        (self.name.as_deref(), self.location.as_deref())
    }

    /// Display name, `undefined` when the parameter has no `name`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("undefined")
    }

    /// `<location>.<name>` label used in change descriptions.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!(
            "{}.{}",
            self.location.as_deref().unwrap_or("undefined"),
            self.display_name()
        )
    }
}

/// One HTTP method on one path.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub operation_id: Option<String>,
    /// `None` when the operation has no `parameters` array
    pub parameters: Option<Vec<Parameter>>,
    /// `None` when the operation has no `responses` object
    pub responses: Option<IndexMap<String, Value>>,
    pub request_body: Option<Value>,
}

impl Operation {
    /// Extract the typed view of an operation object.
    #[must_use]
    pub fn from_value(raw: &Value) -> Self {
        Self {
            operation_id: str_field(raw, "operationId")
                .filter(|id| !id.is_empty())
                .map(str::to_string),
            parameters: field(raw, "parameters")
                .and_then(Value::as_array)
                .map(|params| params.iter().map(Parameter::from_value).collect()),
            responses: object_field(raw, "responses").map(|responses| {
                responses
                    .iter()
                    .map(|(code, response)| (code.clone(), response.clone()))
                    .collect()
            }),
            request_body: field(raw, "requestBody").cloned(),
        }
    }

    /// Identity of this operation: its `operationId`, or `"<METHOD> <path>"`.
    #[must_use]
    pub fn identity(&self, method: HttpMethod, path: &str) -> String {
        self.operation_id
            .clone()
            .unwrap_or_else(|| format!("{} {path}", method.as_upper()))
    }
}

/// Operations declared under one path template.
///
/// Method keys are matched case-insensitively and keyed by [`HttpMethod`],
/// so `get` and `GET` on the same path collapse into a single operation
/// (the later key in document order wins) and are counted once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathItem {
    pub operations: IndexMap<HttpMethod, Operation>,
}

impl PathItem {
    fn from_value(raw: &Value) -> Self {
        let operations = raw
            .as_object()
            .map(|item| {
                item.iter()
                    .filter_map(|(key, op)| {
                        HttpMethod::parse(key).map(|method| (method, Operation::from_value(op)))
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { operations }
    }
}

/// Parsed root of a specification document.
///
/// Holds the path -> method -> operation extraction and the merged model map.
/// Built once per comparison and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct SpecDocument {
    pub paths: IndexMap<String, PathItem>,
    /// Named schemas: `definitions` entries, overlaid by `components.schemas`
    pub models: IndexMap<String, Value>,
    pub dialect: SpecDialect,
    /// xxh3 hash of the source text, 0 when built from a tree directly
    pub content_hash: u64,
}

impl SpecDocument {
    /// Extract paths and models from a parsed document root.
    ///
    /// Missing `paths`, `definitions` or `components.schemas` yield empty
    /// maps; a document without any of them is valid and simply empty.
    #[must_use]
    pub fn from_value(root: &Value) -> Self {
        Self {
            paths: extract_paths(root),
            models: extract_models(root),
            dialect: SpecDialect::detect(root),
            content_hash: 0,
        }
    }

    /// Attach the source-text hash used for the identical-content short circuit.
    #[must_use]
    pub const fn with_content_hash(mut self, hash: u64) -> Self {
        self.content_hash = hash;
        self
    }

    /// Number of operations across all paths.
    #[must_use]
    pub fn endpoint_count(&self) -> usize {
        self.paths.values().map(|item| item.operations.len()).sum()
    }

    /// Number of named models.
    #[must_use]
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Whether the document declares neither operations nor models.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.models.is_empty()
    }
}

fn extract_paths(root: &Value) -> IndexMap<String, PathItem> {
    object_field(root, "paths")
        .map(|paths| {
            paths
                .iter()
                .filter(|(_, item)| is_truthy(item))
                .map(|(path, item)| (path.clone(), PathItem::from_value(item)))
                .collect()
        })
        .unwrap_or_default()
}

fn extract_models(root: &Value) -> IndexMap<String, Value> {
    let mut models = IndexMap::new();
    if let Some(definitions) = object_field(root, "definitions") {
        merge_models(&mut models, definitions);
    }
    if let Some(schemas) = field(root, "components").and_then(|c| object_field(c, "schemas")) {
        // Last writer wins on name collisions: 3.x entries replace 2.x ones.
        merge_models(&mut models, schemas);
    }
    models
}

/// Every entry is kept, null or `false` included, so model counts reflect
/// the declared names. The model differ treats falsy schemas as absent.
fn merge_models(models: &mut IndexMap<String, Value>, source: &Map<String, Value>) {
    for (name, schema) in source {
        models.insert(name.clone(), schema.clone());
    }
}
