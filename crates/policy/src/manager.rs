//! Dispatch of operations to the requested visitors

use crate::registry::VisitorRegistry;
use crate::validator::ConfigurationValidator;
use crate::visitor::OperationVisitor;
use indexmap::IndexSet;
use std::sync::Arc;
use swagger_import_common::{IntermediateOperation, Policy, SpecVersion};
use tracing::{debug, warn};

/// Attaches at most one generated policy to each operation
#[derive(Debug, Clone)]
pub struct PolicyOperationVisitorManager {
    registry: Arc<VisitorRegistry>,
    validator: ConfigurationValidator,
}

impl PolicyOperationVisitorManager {
    pub fn new(registry: Arc<VisitorRegistry>, validator: ConfigurationValidator) -> Self {
        Self {
            registry,
            validator,
        }
    }

    pub fn policy_visitors(&self) -> &[Arc<dyn OperationVisitor>] {
        self.registry.visitors()
    }

    pub fn validator(&self) -> &ConfigurationValidator {
        &self.validator
    }

    /// Run the requested visitors on `operation` in registration order
    ///
    /// The first policy produced and accepted by the configuration validator
    /// wins. Visitor failures and rejected configurations are logged and the
    /// next visitor is tried.
    pub fn attach_policies(
        &self,
        operation: &IntermediateOperation,
        requested_ids: &IndexSet<String>,
        include_policy_paths: bool,
        version: SpecVersion,
    ) -> Option<Policy> {
        if requested_ids.is_empty() {
            return None;
        }

        let mut seen = IndexSet::new();
        for candidate in self.registry.visitors() {
            let id = candidate.id();
            if !requested_ids.contains(id) || !seen.insert(id) {
                continue;
            }
            let Some(visitor) = self.registry.visitor_for_version(id, version) else {
                continue;
            };

            let mut policy = match visitor.visit(operation, include_policy_paths) {
                Ok(Some(policy)) => policy,
                Ok(None) => continue,
                Err(e) => {
                    warn!(
                        visitor = id,
                        method = %operation.method,
                        path = %operation.path_template,
                        error = %e,
                        "operation visitor failed"
                    );
                    continue;
                }
            };

            match self.validator.validate(&mut policy) {
                Ok(()) => {
                    debug!(
                        policy = %policy.name,
                        method = %operation.method,
                        path = %operation.path_template,
                        "attached policy"
                    );
                    return Some(policy);
                }
                Err(e) => warn!(
                    visitor = id,
                    method = %operation.method,
                    path = %operation.path_template,
                    error = %e,
                    "dropping generated policy"
                ),
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PolicyCatalog;
    use crate::visitor::{MockOperationVisitor, VisitorError};
    use swagger_import_common::HttpMethod;

    fn visitor(
        id: &'static str,
        result: fn() -> Result<Option<Policy>, VisitorError>,
    ) -> MockOperationVisitor {
        let mut mock = MockOperationVisitor::new();
        mock.expect_id().return_const(id);
        mock.expect_name().return_const(id);
        mock.expect_visit().returning(move |_, _| result());
        mock
    }

    fn manager(registry: VisitorRegistry) -> PolicyOperationVisitorManager {
        let catalog = Arc::new(PolicyCatalog::builtin());
        PolicyOperationVisitorManager::new(Arc::new(registry), ConfigurationValidator::new(catalog))
    }

    fn requested(ids: &[&str]) -> IndexSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn operation() -> IntermediateOperation {
        IntermediateOperation::new("/pets", HttpMethod::Get)
    }

    #[test]
    fn test_first_policy_in_registration_order_wins() {
        let mut registry = VisitorRegistry::new();
        registry.register(Arc::new(visitor("first", || Ok(Some(Policy::new("first", "{}"))))));
        registry.register(Arc::new(visitor("second", || Ok(Some(Policy::new("second", "{}"))))));
        let manager = manager(registry);

        let policy = manager.attach_policies(
            &operation(),
            &requested(&["second", "first"]),
            false,
            SpecVersion::Swagger2,
        );
        assert_eq!(policy.unwrap().name, "first");
    }

    #[test]
    fn test_only_requested_visitors_run() {
        let mut registry = VisitorRegistry::new();
        let mut skipped = MockOperationVisitor::new();
        skipped.expect_id().return_const("skipped");
        skipped.expect_visit().never();
        registry.register(Arc::new(skipped));
        registry.register(Arc::new(visitor("wanted", || Ok(Some(Policy::new("wanted", "{}"))))));
        let manager = manager(registry);

        let policy = manager.attach_policies(&operation(), &requested(&["wanted"]), false, SpecVersion::Swagger1);
        assert_eq!(policy.unwrap().name, "wanted");

        assert!(manager
            .attach_policies(&operation(), &IndexSet::new(), false, SpecVersion::Swagger1)
            .is_none());
    }

    #[test]
    fn test_failures_fall_through_to_next_visitor() {
        let mut registry = VisitorRegistry::new();
        registry.register(Arc::new(visitor("failing", || {
            Err(VisitorError::Unsupported {
                visitor: "failing",
                reason: "boom".to_string(),
            })
        })));
        registry.register(Arc::new(visitor("empty", || Ok(None))));
        // Rejected by the built-in mock schema: status is required
        registry.register(Arc::new(visitor("mock", || Ok(Some(Policy::new("mock", r#"{"content": "x"}"#))))));
        let manager = manager(registry);

        let policy = manager.attach_policies(
            &operation(),
            &requested(&["failing", "empty", "mock"]),
            false,
            SpecVersion::Swagger2,
        );
        assert!(policy.is_none());
    }

    #[test]
    fn test_builtin_mock_for_openapi3() {
        let manager = manager(VisitorRegistry::with_builtin());
        let policy = manager
            .attach_policies(&operation(), &requested(&["mock"]), true, SpecVersion::OpenApi3)
            .unwrap();
        assert_eq!(policy.name, "mock");
    }
}
