//! Process-wide registry of operation visitors

use crate::visitor::OperationVisitor;
use crate::visitors::{JsonValidationVisitor, MockVisitor, OaiMockVisitor, RequestValidationVisitor};
use indexmap::IndexMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use swagger_import_common::SpecVersion;
use tracing::debug;

/// Ordered, append-only collection of visitors
///
/// Registration order decides which visitor wins when several produce a
/// policy for the same operation. OpenAPI 3 specific visitors are kept apart
/// and replace the generic visitor of the same id for OpenAPI 3 documents.
#[derive(Default, Clone)]
pub struct VisitorRegistry {
    visitors: Vec<Arc<dyn OperationVisitor>>,
    openapi_visitors: IndexMap<&'static str, Arc<dyn OperationVisitor>>,
}

impl VisitorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in visitors
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(MockVisitor));
        registry.register(Arc::new(JsonValidationVisitor));
        registry.register(Arc::new(RequestValidationVisitor));
        registry.register_for_openapi(Arc::new(OaiMockVisitor));
        registry
    }

    /// Shared registry, populated once on first use
    pub fn global() -> Arc<VisitorRegistry> {
        static REGISTRY: OnceLock<Arc<VisitorRegistry>> = OnceLock::new();
        REGISTRY
            .get_or_init(|| Arc::new(VisitorRegistry::with_builtin()))
            .clone()
    }

    pub fn register(&mut self, visitor: Arc<dyn OperationVisitor>) {
        debug!(id = visitor.id(), "registering operation visitor");
        self.visitors.push(visitor);
    }

    /// Register an OpenAPI 3 specific visitor; a later one with the same id
    /// does not replace the first
    pub fn register_for_openapi(&mut self, visitor: Arc<dyn OperationVisitor>) {
        debug!(id = visitor.id(), "registering OpenAPI 3 operation visitor");
        self.openapi_visitors.entry(visitor.id()).or_insert(visitor);
    }

    /// Generic visitors in registration order
    pub fn visitors(&self) -> &[Arc<dyn OperationVisitor>] {
        &self.visitors
    }

    /// The visitor to run for `id` on a document of the given version
    pub fn visitor_for_version(
        &self,
        id: &str,
        version: SpecVersion,
    ) -> Option<&Arc<dyn OperationVisitor>> {
        if version == SpecVersion::OpenApi3 {
            if let Some(visitor) = self.openapi_visitors.get(id) {
                return Some(visitor);
            }
        }
        self.visitors.iter().find(|v| v.id() == id)
    }
}

impl fmt::Debug for VisitorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisitorRegistry")
            .field("visitors", &self.visitors.iter().map(|v| v.id()).collect::<Vec<_>>())
            .field("openapi_visitors", &self.openapi_visitors.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visitor::MockOperationVisitor;
    use crate::visitors::{JSON_VALIDATION_ID, MOCK_ID, REQUEST_VALIDATION_ID};

    #[test]
    fn test_builtin_order() {
        let registry = VisitorRegistry::with_builtin();
        let ids: Vec<&str> = registry.visitors().iter().map(|v| v.id()).collect();
        assert_eq!(ids, vec![MOCK_ID, JSON_VALIDATION_ID, REQUEST_VALIDATION_ID]);
    }

    #[test]
    fn test_openapi_override_only_for_openapi3() {
        let mut registry = VisitorRegistry::new();
        let mut generic = MockOperationVisitor::new();
        generic.expect_id().return_const("custom");
        generic.expect_name().return_const("Generic");
        let mut oai = MockOperationVisitor::new();
        oai.expect_id().return_const("custom");
        oai.expect_name().return_const("OpenAPI");
        registry.register(Arc::new(generic));
        registry.register_for_openapi(Arc::new(oai));

        let name = |version| registry.visitor_for_version("custom", version).map(|v| v.name());
        assert_eq!(name(SpecVersion::Swagger2), Some("Generic"));
        assert_eq!(name(SpecVersion::OpenApi3), Some("OpenAPI"));
        assert!(registry.visitor_for_version("other", SpecVersion::OpenApi3).is_none());
    }

    #[test]
    fn test_global_is_shared() {
        assert!(Arc::ptr_eq(&VisitorRegistry::global(), &VisitorRegistry::global()));
    }
}
