//! Catalog of known policy plugins

use crate::visitors::{JSON_VALIDATION_ID, MOCK_ID, REQUEST_VALIDATION_ID};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::json;
use swagger_import_common::{ImportError, PoliciesConfig, PolicyPhase, PolicyPluginDescriptor, Result};
use tracing::debug;

/// Public description of a policy plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyEntity {
    pub id: String,
    pub name: String,
    pub version: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub development: PolicyDevelopment,
}

/// Entry points a policy implements, derived from its declared phases
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDevelopment {
    pub class_name: String,
    pub on_request_method: Option<String>,
    pub on_response_method: Option<String>,
}

impl PolicyDevelopment {
    fn from_phases(id: &str, phases: &[PolicyPhase]) -> Self {
        let method = |phase: PolicyPhase, name: &str| {
            phases
                .contains(&phase)
                .then(|| format!("{}::{}", id, name))
        };
        Self {
            class_name: id.to_string(),
            on_request_method: method(PolicyPhase::OnRequest, "on_request"),
            on_response_method: method(PolicyPhase::OnResponse, "on_response"),
        }
    }
}

#[derive(Debug, Clone)]
struct CatalogEntry {
    entity: PolicyEntity,
    schema: Option<String>,
}

/// Known policies and their configuration schemas
///
/// Starts with the policies produced by the built-in visitors; plugin
/// descriptors from the configuration are appended, replacing a built-in
/// entry with the same id.
#[derive(Debug, Clone)]
pub struct PolicyCatalog {
    entries: IndexMap<String, CatalogEntry>,
}

impl Default for PolicyCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PolicyCatalog {
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        for descriptor in builtin_descriptors() {
            catalog.insert(&descriptor);
        }
        catalog
    }

    /// Built-in policies plus the configured plugins
    pub fn from_config(config: &PoliciesConfig) -> Result<Self> {
        let mut catalog = Self::builtin();
        for plugin in &config.plugins {
            catalog.register(plugin)?;
        }
        Ok(catalog)
    }

    /// Add a plugin; its schema, when present, must be JSON
    pub fn register(&mut self, descriptor: &PolicyPluginDescriptor) -> Result<()> {
        if let Some(schema) = descriptor.schema.as_deref().filter(|s| !s.trim().is_empty()) {
            serde_json::from_str::<serde_json::Value>(schema).map_err(|e| {
                ImportError::Config(format!(
                    "schema of policy plugin '{}' is not JSON: {}",
                    descriptor.id, e
                ))
            })?;
        }
        debug!(id = %descriptor.id, "registering policy plugin");
        self.insert(descriptor);
        Ok(())
    }

    fn insert(&mut self, descriptor: &PolicyPluginDescriptor) {
        let entity = PolicyEntity {
            id: descriptor.id.clone(),
            name: descriptor.name.clone(),
            version: descriptor.version.clone(),
            category: descriptor.category.clone(),
            description: descriptor.description.clone(),
            development: PolicyDevelopment::from_phases(&descriptor.id, &descriptor.phases),
        };
        self.entries.insert(
            descriptor.id.clone(),
            CatalogEntry {
                entity,
                schema: descriptor.schema.clone(),
            },
        );
    }

    pub fn find_all(&self) -> Vec<&PolicyEntity> {
        self.entries.values().map(|e| &e.entity).collect()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&PolicyEntity> {
        self.entries.get(id).map(|e| &e.entity)
    }

    /// Configuration schema of a policy, by policy name
    pub fn schema_for(&self, policy_name: &str) -> Option<&str> {
        self.entries
            .get(policy_name)
            .and_then(|e| e.schema.as_deref())
    }
}

fn builtin_descriptors() -> Vec<PolicyPluginDescriptor> {
    let mock_schema = json!({
        "type": "object",
        "properties": {
            "status": {"type": "string"},
            "headers": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "value": {"type": "string"}
                    },
                    "required": ["name"]
                }
            },
            "content": {"type": "string"}
        },
        "required": ["status"]
    });
    let json_validation_schema = json!({
        "type": "object",
        "properties": {
            "scope": {"type": "string", "enum": ["REQUEST", "RESPONSE"]},
            "errorMessage": {"type": "string"},
            "schema": {"type": "string"}
        },
        "required": ["schema"]
    });
    let request_validation_schema = json!({
        "type": "object",
        "properties": {
            "scope": {"type": "string", "enum": ["REQUEST", "REQUEST_CONTENT"]},
            "status": {"type": "string"},
            "rules": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "input": {"type": "string"},
                        "constraint": {
                            "type": "object",
                            "properties": {
                                "type": {"type": "string"},
                                "parameters": {"type": "array", "items": {"type": "string"}}
                            },
                            "required": ["type"]
                        }
                    },
                    "required": ["input", "constraint"]
                }
            }
        },
        "required": ["rules"]
    });

    vec![
        PolicyPluginDescriptor {
            id: MOCK_ID.to_string(),
            name: "Mock".to_string(),
            version: None,
            category: Some("others".to_string()),
            description: Some("Answer requests with a static response".to_string()),
            schema: Some(mock_schema.to_string()),
            phases: vec![PolicyPhase::OnRequest],
        },
        PolicyPluginDescriptor {
            id: JSON_VALIDATION_ID.to_string(),
            name: "JSON Validation".to_string(),
            version: None,
            category: Some("transformation".to_string()),
            description: Some("Validate JSON payloads against a JSON schema".to_string()),
            schema: Some(json_validation_schema.to_string()),
            phases: vec![PolicyPhase::OnRequest, PolicyPhase::OnResponse],
        },
        PolicyPluginDescriptor {
            id: REQUEST_VALIDATION_ID.to_string(),
            name: "Validate Request".to_string(),
            version: None,
            category: Some("security".to_string()),
            description: Some("Reject requests missing required parameters".to_string()),
            schema: Some(request_validation_schema.to_string()),
            phases: vec![PolicyPhase::OnRequest],
        },
    ]
}
