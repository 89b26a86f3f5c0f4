//! The gateway-ready API definition produced by an import

use crate::HttpMethod;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Name of the single endpoint group created for imported targets
pub const DEFAULT_ENDPOINT_GROUP: &str = "default-group";

/// Imported API definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDraft {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Keyed by normalized path (`/pets/:petId`), in document order
    pub paths: IndexMap<String, Path>,
    pub proxy: Proxy,
    /// Resolved group ids
    pub groups: IndexSet<String>,
    pub categories: IndexSet<String>,
    pub tags: IndexSet<String>,
    pub labels: Vec<String>,
    pub properties: IndexMap<String, String>,
    pub metadata: Vec<ApiMetadata>,
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl ApiDraft {
    /// Targets of the default endpoint group, in resolution order
    pub fn endpoint_targets(&self) -> Vec<&str> {
        self.proxy
            .groups
            .iter()
            .flat_map(|group| group.endpoints.iter())
            .map(|endpoint| endpoint.target.as_str())
            .collect()
    }
}

/// Proxy settings: where the API is exposed and where it forwards to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proxy {
    pub virtual_hosts: Vec<VirtualHost>,
    pub groups: Vec<EndpointGroup>,
}

/// Externally reachable host + path prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualHost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    pub path: String,
    #[serde(default)]
    pub override_entrypoint: bool,
}

impl VirtualHost {
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            host: None,
            path: path.into(),
            override_entrypoint: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointGroup {
    pub name: String,
    pub endpoints: Vec<Endpoint>,
}

/// Backend target the gateway proxies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub name: String,
    pub target: String,
}

/// All rules declared for one normalized path template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub path: String,
    pub rules: Vec<Rule>,
}

impl Path {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            rules: Vec::new(),
        }
    }

    /// Rule handling `method`, if any
    pub fn rule_for(&self, method: HttpMethod) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.methods.contains(&method))
    }
}

/// Per-method behavior of a path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub methods: IndexSet<HttpMethod>,
    pub description: String,
    pub enabled: bool,
    pub policies: Vec<Policy>,
}

impl Rule {
    pub fn new(method: HttpMethod, description: impl Into<String>) -> Self {
        Self {
            methods: IndexSet::from([method]),
            description: description.into(),
            enabled: true,
            policies: Vec::new(),
        }
    }
}

/// A configured policy; `configuration` is a JSON document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub name: String,
    pub configuration: String,
}

impl Policy {
    pub fn new(name: impl Into<String>, configuration: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            configuration: configuration.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMetadata {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub format: MetadataFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MetadataFormat {
    #[default]
    String,
    Numeric,
    Boolean,
    Date,
    Mail,
    Url,
}

impl MetadataFormat {
    pub fn from_name(name: &str) -> Option<MetadataFormat> {
        match name.to_ascii_uppercase().as_str() {
            "STRING" => Some(MetadataFormat::String),
            "NUMERIC" => Some(MetadataFormat::Numeric),
            "BOOLEAN" => Some(MetadataFormat::Boolean),
            "DATE" => Some(MetadataFormat::Date),
            "MAIL" => Some(MetadataFormat::Mail),
            "URL" => Some(MetadataFormat::Url),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_lookup_by_method() {
        let mut path = Path::new("/pets");
        path.rules.push(Rule::new(HttpMethod::Get, "List pets"));
        path.rules.push(Rule::new(HttpMethod::Post, "Create a pet"));

        assert_eq!(
            path.rule_for(HttpMethod::Post).map(|r| r.description.as_str()),
            Some("Create a pet")
        );
        assert!(path.rule_for(HttpMethod::Delete).is_none());
    }

    #[test]
    fn test_virtual_host_serialization() {
        let vhost = VirtualHost::with_path("/v1");
        let json = serde_json::to_value(&vhost).unwrap();
        assert_eq!(json, serde_json::json!({"path": "/v1", "overrideEntrypoint": false}));
    }
}
