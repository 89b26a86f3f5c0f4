//! Version-independent representation of a parsed API description
//!
//! Each version adapter lowers its own document model into an [`AdaptedSpec`]:
//! a flat list of [`IntermediateOperation`]s plus the server information the
//! target resolver needs.

use crate::{HttpMethod, SpecVersion};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Vendor extensions (`x-*` keys) kept as opaque JSON
pub type Extensions = IndexMap<String, Value>;

/// Output of a version adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptedSpec {
    pub spec_version: SpecVersion,
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub operations: Vec<IntermediateOperation>,
    pub servers: Vec<ServerEntry>,
    /// Document-level vendor extensions
    pub extensions: Extensions,
    /// Vendor extensions of the Paths Object
    #[serde(default)]
    pub paths_extensions: Extensions,
}

/// One method of one raw path entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntermediateOperation {
    /// Path template with `:name` placeholders
    pub path_template: String,
    pub method: HttpMethod,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
    pub responses: Vec<OperationResponse>,
    /// Extensions declared on the path item
    pub path_extensions: Extensions,
    /// Extensions declared on the operation
    pub extensions: Extensions,
    /// OpenAPI 3 only
    pub examples: Option<Value>,
    /// OpenAPI 3 only
    pub links: Option<Value>,
    /// OpenAPI 3 only
    pub callbacks: Option<Value>,
}

impl IntermediateOperation {
    pub fn new(path_template: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path_template: path_template.into(),
            method,
            operation_id: None,
            summary: None,
            description: None,
            consumes: Vec::new(),
            produces: Vec::new(),
            parameters: Vec::new(),
            request_body: None,
            responses: Vec::new(),
            path_extensions: Extensions::new(),
            extensions: Extensions::new(),
            examples: None,
            links: None,
            callbacks: None,
        }
    }

    /// Summary, then description, then empty
    pub fn rule_description(&self) -> String {
        self.summary
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.description.as_deref())
            .unwrap_or_default()
            .to_string()
    }

    /// First successful (2xx, then `default`) response
    pub fn success_response(&self) -> Option<&OperationResponse> {
        self.responses
            .iter()
            .find(|r| r.status.starts_with('2'))
            .or_else(|| self.responses.iter().find(|r| r.status == "default"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
    Body,
    Form,
}

impl ParameterLocation {
    /// Swagger 1 uses `form`, Swagger 2 `formData`
    pub fn from_name(name: &str) -> Option<ParameterLocation> {
        match name {
            "path" => Some(ParameterLocation::Path),
            "query" => Some(ParameterLocation::Query),
            "header" => Some(ParameterLocation::Header),
            "cookie" => Some(ParameterLocation::Cookie),
            "body" => Some(ParameterLocation::Body),
            "form" | "formData" => Some(ParameterLocation::Form),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub description: Option<String>,
    /// JSON schema of the value, local references already resolved
    pub schema: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    pub media_type: String,
    pub required: bool,
    pub schema: Option<Value>,
    pub example: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationResponse {
    /// Status code as written in the document (`200`, `2XX`, `default`)
    pub status: String,
    pub description: Option<String>,
    pub media_type: Option<String>,
    pub schema: Option<Value>,
    pub example: Option<Value>,
}

/// A server entry; Swagger 1/2 base URLs become an entry without variables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerEntry {
    pub url: String,
    pub variables: IndexMap<String, ServerVariable>,
}

impl ServerEntry {
    pub fn plain(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            variables: IndexMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerVariable {
    pub default: Option<String>,
    pub enum_values: Vec<String>,
}
