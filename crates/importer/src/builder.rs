//! Grouping of operations into paths and rules

use indexmap::IndexMap;
use swagger_import_common::{ImportError, IntermediateOperation, Path, Policy, Rule};
use tracing::warn;

/// Group operations by path template, one rule per method
///
/// Paths and rules keep first-appearance order. `attach` may return a policy
/// for each operation. A repeated (path, method) pair is reported and its
/// last occurrence replaces the earlier rule in place.
pub fn build_paths<F>(operations: &[IntermediateOperation], mut attach: F) -> IndexMap<String, Path>
where
    F: FnMut(&IntermediateOperation) -> Option<Policy>,
{
    let mut paths: IndexMap<String, Path> = IndexMap::new();

    for operation in operations {
        let mut rule = Rule::new(operation.method, operation.rule_description());
        rule.policies.extend(attach(operation));

        let path = paths
            .entry(operation.path_template.clone())
            .or_insert_with(|| Path::new(operation.path_template.clone()));

        match path
            .rules
            .iter()
            .position(|r| r.methods.contains(&operation.method))
        {
            Some(index) => {
                let duplicate = ImportError::DuplicateOperation {
                    path: operation.path_template.clone(),
                    method: operation.method,
                };
                warn!("{}, keeping the last declaration", duplicate);
                path.rules[index] = rule;
            }
            None => path.rules.push(rule),
        }
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use swagger_import_common::HttpMethod;

    fn operation(path: &str, method: HttpMethod, summary: Option<&str>, description: Option<&str>) -> IntermediateOperation {
        let mut operation = IntermediateOperation::new(path, method);
        operation.summary = summary.map(String::from);
        operation.description = description.map(String::from);
        operation
    }

    #[test]
    fn test_rules_follow_first_seen_order() {
        let operations = vec![
            operation("/pets", HttpMethod::Post, Some("Create"), None),
            operation("/pets/:petId", HttpMethod::Get, None, Some("Read one")),
            operation("/pets", HttpMethod::Get, None, None),
        ];
        let paths = build_paths(&operations, |_| None);

        let keys: Vec<&str> = paths.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["/pets", "/pets/:petId"]);

        let pets = &paths["/pets"];
        let methods: Vec<HttpMethod> = pets.rules.iter().flat_map(|r| r.methods.iter().copied()).collect();
        assert_eq!(methods, vec![HttpMethod::Post, HttpMethod::Get]);
        assert_eq!(pets.rules[0].description, "Create");
        assert_eq!(pets.rules[1].description, "");
        assert_eq!(paths["/pets/:petId"].rules[0].description, "Read one");
    }

    #[test]
    fn test_duplicate_operation_keeps_last_in_place() {
        let operations = vec![
            operation("/pets", HttpMethod::Get, Some("First"), None),
            operation("/pets", HttpMethod::Put, Some("Update"), None),
            operation("/pets", HttpMethod::Get, Some("Second"), None),
        ];
        let paths = build_paths(&operations, |_| None);

        let rules = &paths["/pets"].rules;
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].description, "Second");
        assert_eq!(rules[1].description, "Update");
    }

    #[test]
    fn test_attached_policies() {
        let operations = vec![
            operation("/pets", HttpMethod::Get, None, None),
            operation("/pets", HttpMethod::Delete, None, None),
        ];
        let paths = build_paths(&operations, |op| {
            (op.method == HttpMethod::Get).then(|| Policy::new("mock", "{}"))
        });

        let pets = &paths["/pets"];
        assert_eq!(pets.rule_for(HttpMethod::Get).unwrap().policies.len(), 1);
        assert!(pets.rule_for(HttpMethod::Delete).unwrap().policies.is_empty());
    }
}
