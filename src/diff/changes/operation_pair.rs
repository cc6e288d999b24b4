//! Diff of one operation present on both sides (same path, same method).
//!
//! Reports at parameter / response / request-body granularity, so every
//! change produced here has `method` and `path` set to `N/A`; callers
//! correlate through the operation identity.

use crate::diff::equality::values_equal;
use crate::diff::result::{ApiChange, ChangeType, Severity};
use crate::model::{Operation, Parameter};
use indexmap::IndexMap;
use serde_json::Value;

/// Compare parameters, responses and request bodies of an operation pair.
///
/// Each section only runs when both operations declare it.
#[must_use]
pub fn diff_operation_pair(identity: &str, base: &Operation, target: &Operation) -> Vec<ApiChange> {
    let mut changes = Vec::new();

    if let (Some(base_params), Some(target_params)) = (&base.parameters, &target.parameters) {
        changes.extend(diff_parameters(identity, base_params, target_params));
    }
    if let (Some(base_responses), Some(target_responses)) = (&base.responses, &target.responses) {
        changes.extend(diff_responses(identity, base_responses, target_responses));
    }
    if let (Some(base_body), Some(target_body)) = (&base.request_body, &target.request_body) {
        if !values_equal(base_body, target_body) {
            changes.push(
                ApiChange::new(
                    identity,
                    ChangeType::ChangedModel,
                    Severity::Medium,
                    "Request body schema changed",
                )
                .with_old_params("requestBody", base_body.clone())
                .with_new_params("requestBody", target_body.clone()),
            );
        }
    }

    changes
}

/// First parameter in `params` with the same `(name, in)` key.
fn find_match<'a>(params: &'a [Parameter], key: (Option<&str>, Option<&str>)) -> Option<&'a Parameter> {
    params.iter().find(|p| p.key() == key)
}

/// Parameter delta: new (target order), then removed and modified (base order).
fn diff_parameters(identity: &str, base: &[Parameter], target: &[Parameter]) -> Vec<ApiChange> {
    let mut changes = Vec::new();

    for param in target {
        if find_match(base, param.key()).is_none() {
            changes.push(
                ApiChange::new(
                    identity,
                    ChangeType::ChangedParam,
                    Severity::Medium,
                    format!("New parameter: {}", param.qualified_name()),
                )
                .with_new_params(param.display_name(), param.raw.clone()),
            );
        }
    }

    for param in base {
        if find_match(target, param.key()).is_none() {
            changes.push(
                ApiChange::new(
                    identity,
                    ChangeType::ChangedParam,
                    Severity::High,
                    format!("Removed parameter: {}", param.qualified_name()),
                )
                .with_old_params(param.display_name(), param.raw.clone()),
            );
        }
    }

    for param in base {
        if let Some(counterpart) = find_match(target, param.key()) {
            if !values_equal(&param.raw, &counterpart.raw) {
                changes.push(
                    ApiChange::new(
                        identity,
                        ChangeType::ChangedParam,
                        Severity::Medium,
                        format!("Modified parameter: {}", param.qualified_name()),
                    )
                    .with_old_params(param.display_name(), param.raw.clone())
                    .with_new_params(counterpart.display_name(), counterpart.raw.clone()),
                );
            }
        }
    }

    changes
}

/// Response-code existence delta. Content under a shared code is not compared.
fn diff_responses(
    identity: &str,
    base: &IndexMap<String, Value>,
    target: &IndexMap<String, Value>,
) -> Vec<ApiChange> {
    let mut changes = Vec::new();

    for (code, response) in target {
        if !has_response(base, code) {
            changes.push(
                ApiChange::new(
                    identity,
                    ChangeType::ChangedParam,
                    Severity::Low,
                    format!("New response code: {code}"),
                )
                .with_new_params(code.as_str(), response.clone()),
            );
        }
    }

    for (code, response) in base {
        if !has_response(target, code) {
            changes.push(
                ApiChange::new(
                    identity,
                    ChangeType::ChangedParam,
                    Severity::Medium,
                    format!("Removed response code: {code}"),
                )
                .with_old_params(code.as_str(), response.clone()),
            );
        }
    }

    changes
}

fn has_response(responses: &IndexMap<String, Value>, code: &str) -> bool {
    responses.get(code).is_some_and(crate::model::is_truthy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::result::NOT_APPLICABLE;
    use serde_json::json;

    fn op(value: Value) -> Operation {
        Operation::from_value(&value)
    }

    #[test]
    fn test_identical_operations_produce_nothing() {
        let a = op(json!({
            "parameters": [{"name": "id", "in": "path", "required": true}],
            "responses": {"200": {"description": "ok"}},
            "requestBody": {"content": {"application/json": {}}}
        }));
        assert!(diff_operation_pair("getUser", &a, &a.clone()).is_empty());
    }

    #[test]
    fn test_parameter_added_removed_modified() {
        let base = op(json!({"parameters": [
            {"name": "id", "in": "path", "required": true},
            {"name": "verbose", "in": "query"},
            {"name": "limit", "in": "query", "schema": {"type": "integer"}}
        ]}));
        let target = op(json!({"parameters": [
            {"name": "id", "in": "path", "required": true},
            {"name": "limit", "in": "query", "schema": {"type": "string"}},
            {"name": "expand", "in": "query"}
        ]}));

        let changes = diff_operation_pair("listUsers", &base, &target);
        let descriptions: Vec<_> = changes.iter().map(|c| c.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec![
                "New parameter: query.expand",
                "Removed parameter: query.verbose",
                "Modified parameter: query.limit",
            ]
        );
        assert_eq!(changes[0].severity, Severity::Medium);
        assert_eq!(changes[1].severity, Severity::High);
        assert!(changes[0].new_params.as_ref().unwrap().contains_key("expand"));
        assert!(changes[1].old_params.as_ref().unwrap().contains_key("verbose"));
        let modified = &changes[2];
        assert!(modified.old_params.is_some() && modified.new_params.is_some());
        assert!(changes.iter().all(|c| c.change_type == ChangeType::ChangedParam));
        assert!(changes.iter().all(|c| c.path == NOT_APPLICABLE && c.method == NOT_APPLICABLE));
        assert!(changes.iter().all(|c| c.operation_id == "listUsers"));
    }

    #[test]
    fn test_same_name_different_location_is_distinct() {
        let base = op(json!({"parameters": [{"name": "id", "in": "query"}]}));
        let target = op(json!({"parameters": [{"name": "id", "in": "header"}]}));
        let changes = diff_operation_pair("x", &base, &target);
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].description, "New parameter: header.id");
        assert_eq!(changes[1].description, "Removed parameter: query.id");
    }

    #[test]
    fn test_reordered_parameter_keys_are_not_modified() {
        let base: Value =
            serde_json::from_str(r#"{"parameters": [{"name": "id", "in": "path", "required": true}]}"#)
                .unwrap();
        let target: Value =
            serde_json::from_str(r#"{"parameters": [{"required": true, "in": "path", "name": "id"}]}"#)
                .unwrap();
        assert!(diff_operation_pair("x", &op(base), &op(target)).is_empty());
    }

    #[test]
    fn test_parameters_skipped_unless_both_sides_have_them() {
        let base = op(json!({}));
        let target = op(json!({"parameters": [{"name": "q", "in": "query"}]}));
        assert!(diff_operation_pair("x", &base, &target).is_empty());
    }

    #[test]
    fn test_response_codes() {
        let base = op(json!({"responses": {"200": {"description": "ok"}, "404": {"description": "missing"}}}));
        let target = op(json!({"responses": {"200": {"description": "changed text"}, "201": {"description": "created"}}}));
        let changes = diff_operation_pair("x", &base, &target);
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].description, "New response code: 201");
        assert_eq!(changes[0].severity, Severity::Low);
        assert_eq!(changes[1].description, "Removed response code: 404");
        assert_eq!(changes[1].severity, Severity::Medium);
    }

    #[test]
    fn test_request_body_change() {
        let base = op(json!({"requestBody": {"content": {"application/json": {"schema": {"type": "object"}}}}}));
        let target = op(json!({"requestBody": {"content": {"application/xml": {"schema": {"type": "object"}}}}}));
        let changes = diff_operation_pair("createUser", &base, &target);
        assert_eq!(changes.len(), 1);
        let change = &changes[0];
        assert_eq!(change.change_type, ChangeType::ChangedModel);
        assert_eq!(change.description, "Request body schema changed");
        assert!(change.old_params.as_ref().unwrap().contains_key("requestBody"));
        assert!(change.new_params.as_ref().unwrap().contains_key("requestBody"));
        assert!(change.details.is_none());
    }

    #[test]
    fn test_unnamed_parameter_reads_undefined() {
        let base = op(json!({"parameters": []}));
        let target = op(json!({"parameters": [{"in": "query"}]}));
        let changes = diff_operation_pair("x", &base, &target);
        assert_eq!(changes[0].description, "New parameter: query.undefined");
    }
}
