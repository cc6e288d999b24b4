//! Operation change computer implementation.

use super::operation_pair::diff_operation_pair;
use crate::diff::result::{ApiChange, ChangeType, Severity};
use crate::diff::traits::{ChangeComputer, ChangeList};
use crate::model::{HttpMethod, Operation, PathItem, SpecDocument};

/// Computes endpoint-level changes between two documents.
///
/// Paths only in the target yield one `new` change per operation, paths only
/// in the base one `deprecated` change per operation, and every method
/// declared on both sides of a shared path is diffed with
/// [`diff_operation_pair`].
pub struct OperationChangeComputer {
    report_method_changes: bool,
}

impl OperationChangeComputer {
    /// Create a new operation change computer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            report_method_changes: false,
        }
    }

    /// Also report methods added to or removed from a shared path.
    ///
    /// Off by default: a method that appears on only one side of a path
    /// present in both documents is otherwise not reported at all.
    #[must_use]
    pub const fn with_method_level_changes(mut self, enabled: bool) -> Self {
        self.report_method_changes = enabled;
        self
    }
}

impl Default for OperationChangeComputer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeComputer for OperationChangeComputer {
    fn compute(&self, base: &SpecDocument, target: &SpecDocument) -> ChangeList {
        let mut changes = Vec::new();

        for (path, item) in &target.paths {
            if !base.paths.contains_key(path) {
                changes.extend(endpoints_added(path, item.operations.iter()));
            }
        }

        for (path, item) in &base.paths {
            if !target.paths.contains_key(path) {
                changes.extend(endpoints_removed(path, item.operations.iter()));
            }
        }

        for (path, base_item) in &base.paths {
            let Some(target_item) = target.paths.get(path) else {
                continue;
            };
            for (method, base_op) in &base_item.operations {
                if let Some(target_op) = target_item.operations.get(method) {
                    let identity = base_op.identity(*method, path);
                    changes.extend(diff_operation_pair(&identity, base_op, target_op));
                }
            }
            if self.report_method_changes {
                changes.extend(method_level_changes(path, base_item, target_item));
            }
        }

        changes
    }

    fn name(&self) -> &str {
        "operations"
    }
}

fn endpoints_added<'a>(
    path: &'a str,
    operations: impl Iterator<Item = (&'a HttpMethod, &'a Operation)> + 'a,
) -> impl Iterator<Item = ApiChange> + 'a {
    operations.map(move |(method, op)| {
        ApiChange::new(
            op.identity(*method, path),
            ChangeType::New,
            Severity::Low,
            format!("New endpoint: {method} {path}"),
        )
        .scoped(method.as_upper(), path)
        .with_new_path(path)
    })
}

fn endpoints_removed<'a>(
    path: &'a str,
    operations: impl Iterator<Item = (&'a HttpMethod, &'a Operation)> + 'a,
) -> impl Iterator<Item = ApiChange> + 'a {
    operations.map(move |(method, op)| {
        ApiChange::new(
            op.identity(*method, path),
            ChangeType::Deprecated,
            Severity::High,
            format!("Deprecated endpoint: {method} {path}"),
        )
        .scoped(method.as_upper(), path)
        .with_old_path(path)
    })
}

fn method_level_changes(path: &str, base: &PathItem, target: &PathItem) -> Vec<ApiChange> {
    let added = target
        .operations
        .iter()
        .filter(|(method, _)| !base.operations.contains_key(*method));
    let removed = base
        .operations
        .iter()
        .filter(|(method, _)| !target.operations.contains_key(*method));

    endpoints_added(path, added)
        .chain(endpoints_removed(path, removed))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> SpecDocument {
        SpecDocument::from_value(&value)
    }

    #[test]
    fn test_new_path_emits_one_change_per_method() {
        let base = doc(json!({"paths": {}}));
        let target = doc(json!({"paths": {"/users": {
            "get": {"operationId": "listUsers"},
            "post": {},
            "parameters": []
        }}}));
        let changes = OperationChangeComputer::new().compute(&base, &target);
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].operation_id, "listUsers");
        assert_eq!(changes[0].method, "GET");
        assert_eq!(changes[0].new_path.as_deref(), Some("/users"));
        assert_eq!(changes[1].operation_id, "POST /users");
        assert_eq!(changes[1].description, "New endpoint: POST /users");
        assert!(changes.iter().all(|c| c.change_type == ChangeType::New));
        assert!(changes.iter().all(|c| c.severity == Severity::Low));
    }

    #[test]
    fn test_removed_path() {
        let base = doc(json!({"paths": {"/ping": {"get": {}}}}));
        let target = doc(json!({"paths": {}}));
        let changes = OperationChangeComputer::new().compute(&base, &target);
        assert_eq!(changes.len(), 1);
        let change = &changes[0];
        assert_eq!(change.change_type, ChangeType::Deprecated);
        assert_eq!(change.severity, Severity::High);
        assert_eq!(change.old_path.as_deref(), Some("/ping"));
        assert!(change.new_path.is_none());
        assert_eq!(change.path, "/ping");
    }

    #[test]
    fn test_method_added_to_shared_path_not_reported_by_default() {
        let base = doc(json!({"paths": {"/users": {"get": {"operationId": "listUsers"}}}}));
        let target = doc(json!({"paths": {"/users": {
            "get": {"operationId": "listUsers"},
            "post": {"operationId": "createUser"}
        }}}));
        assert!(OperationChangeComputer::new().compute(&base, &target).is_empty());
    }

    #[test]
    fn test_method_level_changes_when_enabled() {
        let base = doc(json!({"paths": {"/users": {
            "get": {"operationId": "listUsers"},
            "delete": {}
        }}}));
        let target = doc(json!({"paths": {"/users": {
            "get": {"operationId": "listUsers"},
            "post": {"operationId": "createUser"}
        }}}));
        let changes = OperationChangeComputer::new()
            .with_method_level_changes(true)
            .compute(&base, &target);
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].operation_id, "createUser");
        assert_eq!(changes[0].change_type, ChangeType::New);
        assert_eq!(changes[0].path, "/users");
        assert_eq!(changes[1].operation_id, "DELETE /users");
        assert_eq!(changes[1].change_type, ChangeType::Deprecated);
        assert!(changes.iter().all(ApiChange::is_operation_change));
    }

    #[test]
    fn test_shared_operation_uses_base_identity() {
        let base = doc(json!({"paths": {"/users/{id}": {"get": {
            "operationId": "getUser",
            "parameters": [{"name": "id", "in": "path"}]
        }}}}));
        let target = doc(json!({"paths": {"/users/{id}": {"get": {
            "operationId": "fetchUser",
            "parameters": []
        }}}}));
        let changes = OperationChangeComputer::new().compute(&base, &target);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].operation_id, "getUser");
        assert_eq!(changes[0].description, "Removed parameter: path.id");
    }

    #[test]
    fn test_null_path_counts_as_absent() {
        let base = doc(json!({"paths": {"/old": null}}));
        let target = doc(json!({"paths": {"/old": {"get": {}}}}));
        let changes = OperationChangeComputer::new().compute(&base, &target);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].change_type, ChangeType::New);
    }
}
