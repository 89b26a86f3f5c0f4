//! OpenAPI 3.x type definitions
//!
//! Simplified representation focusing on operations and servers. Parameters,
//! request bodies and responses stay as JSON so that `$ref`s into
//! `components` can be followed against the document root.

use crate::lenient;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// OpenAPI document root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApiSpec {
    /// OpenAPI version (e.g., "3.0.0")
    #[serde(deserialize_with = "lenient::string")]
    pub openapi: String,

    /// API metadata
    #[serde(default)]
    pub info: Info,

    /// Document-level servers
    #[serde(default)]
    pub servers: Vec<Server>,

    /// API paths (endpoints) and Paths Object extensions; entries become
    /// [`PathItem`]s in the converter
    #[serde(default)]
    pub paths: IndexMap<String, Value>,

    /// Reusable components
    #[serde(default)]
    pub components: Option<Value>,

    /// Everything else, including `x-*` extensions
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// API information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Info {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,

    #[serde(default, deserialize_with = "lenient::string")]
    pub version: String,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
}

/// Server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    /// Server URL, possibly templated (`https://{env}.example.com`)
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Template variables, in declaration order
    #[serde(default)]
    pub variables: IndexMap<String, ServerVariable>,
}

/// Server URL template variable
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerVariable {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub default: Option<String>,

    #[serde(rename = "enum")]
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub enum_values: Vec<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// Path item; method keys and extensions are kept in document order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,

    /// Parameters shared by every operation of the path
    #[serde(default)]
    pub parameters: Vec<Value>,

    #[serde(flatten)]
    pub entries: IndexMap<String, Value>,
}

/// HTTP operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    /// Operation ID (unique identifier)
    #[serde(rename = "operationId")]
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub operation_id: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,

    #[serde(default)]
    pub parameters: Vec<Value>,

    #[serde(rename = "requestBody")]
    #[serde(default)]
    pub request_body: Option<Value>,

    #[serde(default)]
    pub responses: IndexMap<String, Value>,

    #[serde(default)]
    pub callbacks: Option<Value>,

    /// Tags (for grouping)
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub tags: Vec<String>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}
