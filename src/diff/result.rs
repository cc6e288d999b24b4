//! Diff result structures.
//!
//! Every detected difference is one flat [`ApiChange`] record. Operation- and
//! model-level views are derived from the full list by [`partition_changes`],
//! and every summary is computed with the same counting rule
//! ([`ChangeSummary::from_changes`]).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Placeholder for `path`/`method` on changes that are not path-scoped.
pub const NOT_APPLICABLE: &str = "N/A";

/// Prefix that puts model identities in the operation-identity namespace.
pub const MODEL_ID_PREFIX: &str = "model:";

/// Kind of a detected change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    New,
    Deprecated,
    ChangedPath,
    ChangedParam,
    ChangedModel,
}

impl ChangeType {
    /// Whether this kind counts towards the `changed` summary counter.
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        matches!(
            self,
            Self::ChangedPath | Self::ChangedParam | Self::ChangedModel
        )
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Deprecated => "deprecated",
            Self::ChangedPath => "changed_path",
            Self::ChangedParam => "changed_param",
            Self::ChangedModel => "changed_model",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse impact tier of a change.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level breakdown attached to `changed_model` changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelChangeDetails {
    pub model_name: String,
    /// Human-readable change lines, in a fixed rule order
    pub changes: Vec<String>,
    pub base_schema: Value,
    pub target_schema: Value,
}

/// A single detected difference between two specification documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiChange {
    /// Operation identity, or `model:<name>` for model changes
    pub operation_id: String,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub severity: Severity,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_path: Option<String>,
    /// Singleton mapping from the changed item's key to its base value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_params: Option<Map<String, Value>>,
    /// Singleton mapping from the changed item's key to its target value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_params: Option<Map<String, Value>>,
    pub method: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ModelChangeDetails>,
}

impl ApiChange {
    /// Create a change that is not path-scoped (`method`/`path` are `N/A`).
    pub fn new(
        operation_id: impl Into<String>,
        change_type: ChangeType,
        severity: Severity,
        description: impl Into<String>,
    ) -> Self {
        Self {
            operation_id: operation_id.into(),
            change_type,
            severity,
            description: description.into(),
            old_path: None,
            new_path: None,
            old_params: None,
            new_params: None,
            method: NOT_APPLICABLE.to_string(),
            path: NOT_APPLICABLE.to_string(),
            details: None,
        }
    }

    /// Scope the change to one method on one path.
    #[must_use]
    pub fn scoped(mut self, method: impl Into<String>, path: impl Into<String>) -> Self {
        self.method = method.into();
        self.path = path.into();
        self
    }

    #[must_use]
    pub fn with_old_path(mut self, path: impl Into<String>) -> Self {
        self.old_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_new_path(mut self, path: impl Into<String>) -> Self {
        self.new_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_old_params(mut self, key: impl Into<String>, value: Value) -> Self {
        self.old_params = Some(single_entry(key, value));
        self
    }

    #[must_use]
    pub fn with_new_params(mut self, key: impl Into<String>, value: Value) -> Self {
        self.new_params = Some(single_entry(key, value));
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: ModelChangeDetails) -> Self {
        self.details = Some(details);
        self
    }

    /// Whether the change is scoped to a real path.
    #[must_use]
    pub fn is_path_scoped(&self) -> bool {
        !self.path.is_empty() && self.path != NOT_APPLICABLE
    }

    /// Membership in the operation-changes partition.
    #[must_use]
    pub fn is_operation_change(&self) -> bool {
        self.is_path_scoped()
            && matches!(
                self.change_type,
                ChangeType::New | ChangeType::Deprecated | ChangeType::ChangedPath
            )
    }

    /// Membership in the model-changes partition.
    ///
    /// `changed_param` changes are never path-scoped and are not model
    /// changes either, so they belong to neither partition.
    #[must_use]
    pub fn is_model_change(&self) -> bool {
        self.path == NOT_APPLICABLE
            && matches!(
                self.change_type,
                ChangeType::New | ChangeType::Deprecated | ChangeType::ChangedModel
            )
    }
}

fn single_entry(key: impl Into<String>, value: Value) -> Map<String, Value> {
    let mut map = Map::with_capacity(1);
    map.insert(key.into(), value);
    map
}

/// Counts over one list of changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub total: usize,
    pub new: usize,
    pub changed: usize,
    pub deprecated: usize,
}

impl ChangeSummary {
    /// Count a change list: `new`, `deprecated`, every `changed_*` kind, and the length.
    #[must_use]
    pub fn from_changes(changes: &[ApiChange]) -> Self {
        let mut summary = Self {
            total: changes.len(),
            ..Self::default()
        };
        for change in changes {
            match change.change_type {
                ChangeType::New => summary.new += 1,
                ChangeType::Deprecated => summary.deprecated += 1,
                ChangeType::ChangedPath | ChangeType::ChangedParam | ChangeType::ChangedModel => {
                    summary.changed += 1;
                }
            }
        }
        summary
    }
}

/// Summary of a whole comparison plus its two partitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub total: usize,
    pub new: usize,
    pub changed: usize,
    pub deprecated: usize,
    pub operations: ChangeSummary,
    pub models: ChangeSummary,
}

impl ComparisonSummary {
    /// Build the nested summary from the full list and both partitions.
    #[must_use]
    pub fn new(all: &[ApiChange], operations: &[ApiChange], models: &[ApiChange]) -> Self {
        let overall = ChangeSummary::from_changes(all);
        Self {
            total: overall.total,
            new: overall.new,
            changed: overall.changed,
            deprecated: overall.deprecated,
            operations: ChangeSummary::from_changes(operations),
            models: ChangeSummary::from_changes(models),
        }
    }
}

/// Split a change list into (operation changes, model changes).
#[must_use]
pub fn partition_changes(changes: &[ApiChange]) -> (Vec<ApiChange>, Vec<ApiChange>) {
    let operations = changes
        .iter()
        .filter(|c| c.is_operation_change())
        .cloned()
        .collect();
    let models = changes
        .iter()
        .filter(|c| c.is_model_change())
        .cloned()
        .collect();
    (operations, models)
}

/// Endpoint and model counts of both compared documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecDetails {
    pub base_endpoints: usize,
    pub target_endpoints: usize,
    pub base_models: usize,
    pub target_models: usize,
}

/// Complete result of comparing two specification documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct ComparisonResult {
    pub success: bool,
    pub changes: Vec<ApiChange>,
    pub operation_changes: Vec<ApiChange>,
    pub model_changes: Vec<ApiChange>,
    pub summary: ComparisonSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<SpecDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ComparisonResult {
    /// Assemble a successful result: partitions and summary are derived here.
    pub fn from_changes(changes: Vec<ApiChange>, details: SpecDetails) -> Self {
        let (operation_changes, model_changes) = partition_changes(&changes);
        let summary = ComparisonSummary::new(&changes, &operation_changes, &model_changes);
        Self {
            success: true,
            changes,
            operation_changes,
            model_changes,
            summary,
            details: Some(details),
            error: None,
        }
    }

    /// A failed comparison: no changes, zeroed summary, and the error message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            changes: Vec::new(),
            operation_changes: Vec::new(),
            model_changes: Vec::new(),
            summary: ComparisonSummary::default(),
            details: None,
            error: Some(error.into()),
        }
    }

    /// Check if there are any changes
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Highest severity among all changes.
    #[must_use]
    pub fn max_severity(&self) -> Option<Severity> {
        self.changes.iter().map(|c| c.severity).max()
    }

    /// Changes of one kind, in detection order.
    pub fn changes_of_type(&self, change_type: ChangeType) -> impl Iterator<Item = &ApiChange> {
        self.changes
            .iter()
            .filter(move |c| c.change_type == change_type)
    }
}
