//! Model change computer implementation.

use crate::diff::equality::{options_equal, values_equal};
use crate::diff::result::{
    ApiChange, ChangeType, ModelChangeDetails, Severity, MODEL_ID_PREFIX,
};
use crate::diff::traits::{ChangeComputer, ChangeList};
use crate::model::{display_value, is_truthy, SpecDocument};
use serde_json::{Map, Value};

/// Computes added, removed and modified named models.
pub struct ModelChangeComputer;

impl ModelChangeComputer {
    /// Create a new model change computer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for ModelChangeComputer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeComputer for ModelChangeComputer {
    fn compute(&self, base: &SpecDocument, target: &SpecDocument) -> ChangeList {
        let mut changes = Vec::new();

        for (name, schema) in declared(target) {
            if declared_schema(base, name).is_none() {
                changes.push(
                    ApiChange::new(
                        model_id(name),
                        ChangeType::New,
                        Severity::Low,
                        format!("New model: {name}"),
                    )
                    .with_new_params(name.as_str(), schema.clone()),
                );
            }
        }

        for (name, schema) in declared(base) {
            if declared_schema(target, name).is_none() {
                changes.push(
                    ApiChange::new(
                        model_id(name),
                        ChangeType::Deprecated,
                        Severity::Medium,
                        format!("Removed model: {name}"),
                    )
                    .with_old_params(name.as_str(), schema.clone()),
                );
            }
        }

        for (name, base_schema) in declared(base) {
            let Some(target_schema) = declared_schema(target, name) else {
                continue;
            };
            if values_equal(base_schema, target_schema) {
                continue;
            }

            let lines = analyze_model_changes(base_schema, target_schema);
            let description = if lines.is_empty() {
                format!("Model schema changed: {name}")
            } else {
                format!("Model schema changed: {name} ({} changes)", lines.len())
            };
            changes.push(
                ApiChange::new(model_id(name), ChangeType::ChangedModel, Severity::Medium, description)
                    .with_old_params(name.as_str(), base_schema.clone())
                    .with_new_params(name.as_str(), target_schema.clone())
                    .with_details(ModelChangeDetails {
                        model_name: name.clone(),
                        changes: lines,
                        base_schema: base_schema.clone(),
                        target_schema: target_schema.clone(),
                    }),
            );
        }

        changes
    }

    fn name(&self) -> &str {
        "models"
    }
}

/// Models whose schema is not null, `false`, `0` or `""`.
fn declared<'a>(doc: &'a SpecDocument) -> impl Iterator<Item = (&'a String, &'a Value)> + 'a {
    doc.models.iter().filter(|(_, schema)| is_truthy(schema))
}

fn declared_schema<'a>(doc: &'a SpecDocument, name: &str) -> Option<&'a Value> {
    doc.models.get(name).filter(|schema| is_truthy(schema))
}

fn model_id(name: &str) -> String {
    format!("{MODEL_ID_PREFIX}{name}")
}

/// Shallow structural analysis of a modified model.
///
/// Lines are produced in a fixed order: type, required fields (added then
/// removed), properties (added, removed, modified), description, title.
/// Differences deeper than one property level produce no line; the empty
/// result is legal and callers fall back to the attached schemas.
#[must_use]
pub fn analyze_model_changes(base: &Value, target: &Value) -> Vec<String> {
    let mut lines = Vec::new();

    let (base_type, target_type) = (base.get("type"), target.get("type"));
    if !options_equal(base_type, target_type) {
        lines.push(format!(
            "Type changed: {} → {}",
            display_value(base_type),
            display_value(target_type)
        ));
    }

    let base_required = required_fields(base);
    let target_required = required_fields(target);
    let added_required = names_missing_from(&target_required, &base_required);
    let removed_required = names_missing_from(&base_required, &target_required);
    if !added_required.is_empty() {
        lines.push(format!("Added required fields: {}", added_required.join(", ")));
    }
    if !removed_required.is_empty() {
        lines.push(format!("Removed required fields: {}", removed_required.join(", ")));
    }

    let empty = Map::new();
    let base_props = properties(base).unwrap_or(&empty);
    let target_props = properties(target).unwrap_or(&empty);

    let added: Vec<&str> = target_props
        .keys()
        .filter(|key| !has_property(base_props, key))
        .map(String::as_str)
        .collect();
    if !added.is_empty() {
        lines.push(format!("Added properties: {}", added.join(", ")));
    }

    let removed: Vec<&str> = base_props
        .keys()
        .filter(|key| !has_property(target_props, key))
        .map(String::as_str)
        .collect();
    if !removed.is_empty() {
        lines.push(format!("Removed properties: {}", removed.join(", ")));
    }

    let modified: Vec<&str> = base_props
        .iter()
        .filter(|(key, value)| {
            target_props
                .get(key.as_str())
                .filter(|v| is_truthy(v))
                .is_some_and(|other| !values_equal(value, other))
        })
        .map(|(key, _)| key.as_str())
        .collect();
    if !modified.is_empty() {
        lines.push(format!("Modified properties: {}", modified.join(", ")));
    }

    if !options_equal(base.get("description"), target.get("description")) {
        lines.push("Description changed".to_string());
    }
    if !options_equal(base.get("title"), target.get("title")) {
        lines.push("Title changed".to_string());
    }

    lines
}

fn required_fields(schema: &Value) -> Vec<String> {
    schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().map(|n| display_value(Some(n))).collect())
        .unwrap_or_default()
}

/// Names in `from` that do not appear in `other`, in `from` order.
fn names_missing_from<'a>(from: &'a [String], other: &[String]) -> Vec<&'a str> {
    from.iter()
        .filter(|name| !other.contains(name))
        .map(String::as_str)
        .collect()
}

fn properties(schema: &Value) -> Option<&Map<String, Value>> {
    schema.get("properties").and_then(Value::as_object)
}

fn has_property(props: &Map<String, Value>, key: &str) -> bool {
    props.get(key).is_some_and(is_truthy)
}
