//! The import entry point

use crate::builder::build_paths;
use crate::extensions::map_extensions;
use crate::groups::{GroupLookup, InMemoryGroupLookup};
use crate::target::resolve;
use indexmap::{IndexMap, IndexSet};
use std::sync::Arc;
use swagger_import_common::{
    ApiDraft, ImportDescriptor, ImporterConfig, Proxy, Result, VirtualHost, Visibility,
};
use swagger_import_parser::{load_and_adapt, SpecLoader};
use swagger_import_policy::{
    ConfigurationValidator, PolicyCatalog, PolicyOperationVisitorManager, VisitorRegistry,
};
use tracing::info;

/// Turns import descriptors into API drafts
///
/// Holds only read-only collaborators, so one importer can serve concurrent
/// imports.
pub struct Importer {
    loader: SpecLoader,
    manager: PolicyOperationVisitorManager,
    groups: Arc<dyn GroupLookup>,
}

impl Importer {
    /// Importer using the global visitor registry, the configured policy
    /// plugins and no known groups
    pub fn new(config: &ImporterConfig) -> Result<Self> {
        let catalog = Arc::new(PolicyCatalog::from_config(&config.policies)?);
        Ok(Self {
            loader: SpecLoader::new(&config.fetch),
            manager: PolicyOperationVisitorManager::new(
                VisitorRegistry::global(),
                ConfigurationValidator::new(catalog),
            ),
            groups: Arc::new(InMemoryGroupLookup::default()),
        })
    }

    pub fn with_groups(mut self, groups: Arc<dyn GroupLookup>) -> Self {
        self.groups = groups;
        self
    }

    pub fn with_manager(mut self, manager: PolicyOperationVisitorManager) -> Self {
        self.manager = manager;
        self
    }

    pub fn manager(&self) -> &PolicyOperationVisitorManager {
        &self.manager
    }

    /// Import one API description
    ///
    /// Any load, parse or adaptation error aborts the import. Policy
    /// generation failures only leave the affected rule without policy.
    pub fn create_api(&self, descriptor: &ImportDescriptor) -> Result<ApiDraft> {
        let adapted = load_and_adapt(&self.loader, descriptor)?;
        info!(
            version = %adapted.spec_version,
            title = %adapted.title,
            operations = adapted.operations.len(),
            "importing API description"
        );

        let targets = resolve(
            &adapted.servers,
            &adapted.title,
            descriptor.include_policy_paths,
        );

        let paths = build_paths(&adapted.operations, |operation| {
            self.manager.attach_policies(
                operation,
                &descriptor.requested_policy_ids,
                descriptor.include_policy_paths,
                adapted.spec_version,
            )
        });

        let mut draft = ApiDraft {
            name: adapted.title.clone(),
            version: adapted.version.clone(),
            description: adapted.description.clone(),
            paths,
            proxy: Proxy {
                virtual_hosts: vec![VirtualHost::with_path(targets.virtual_host_path.clone())],
                groups: vec![targets.endpoint_group()],
            },
            groups: IndexSet::new(),
            categories: IndexSet::new(),
            tags: IndexSet::new(),
            labels: Vec::new(),
            properties: IndexMap::new(),
            metadata: Vec::new(),
            visibility: Visibility::default(),
            picture: None,
        };

        map_extensions(&adapted.extensions, self.groups.as_ref()).apply(&mut draft);

        info!(
            name = %draft.name,
            paths = draft.paths.len(),
            targets = targets.endpoint_targets.len(),
            "API draft created"
        );
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_importer_is_send_and_sync() {
        assert_send_sync::<Importer>();
    }

    #[test]
    fn test_inline_import() {
        let importer = Importer::new(&ImporterConfig::default()).unwrap();
        let draft = importer
            .create_api(&ImportDescriptor::inline(
                r#"{"swagger": "2.0", "info": {"title": "Echo", "version": "1"}, "host": "echo.example.com",
                    "paths": {"/echo/": {"get": {"summary": "Echo"}}, "/echo": {"post": {}}}}"#,
            ))
            .unwrap();

        assert_eq!(draft.endpoint_targets(), vec!["https://echo.example.com"]);
        assert_eq!(draft.proxy.virtual_hosts[0].path, "/");
        assert_eq!(draft.paths.len(), 1);
        assert_eq!(draft.paths["/echo"].rules.len(), 2);
        assert_eq!(draft.visibility, Visibility::Public);
    }
}
