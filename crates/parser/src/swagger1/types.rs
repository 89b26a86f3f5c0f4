//! Swagger 1.x type definitions
//!
//! A Swagger 1 description is either a resource listing (whose `apis`
//! entries point at API declarations) or an API declaration (whose `apis`
//! entries carry `operations`). Both share this model.

use crate::lenient;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Resource listing or API declaration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Swagger1Spec {
    #[serde(rename = "swaggerVersion")]
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub swagger_version: Option<String>,

    #[serde(rename = "apiVersion")]
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub api_version: Option<String>,

    /// Absolute URL or path every API of the document is served under
    #[serde(rename = "basePath")]
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub base_path: Option<String>,

    #[serde(rename = "resourcePath")]
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub resource_path: Option<String>,

    #[serde(default)]
    pub info: Option<Info>,

    #[serde(default)]
    pub apis: Vec<ApiEntry>,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub consumes: Vec<String>,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub produces: Vec<String>,

    /// Named models referenced by `type` / `responseModel`
    #[serde(default)]
    pub models: IndexMap<String, Value>,

    /// API declarations fetched for a resource listing
    #[serde(skip)]
    pub declarations: Vec<Swagger1Spec>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Swagger1Spec {
    /// True when the document declares operations itself
    pub fn is_declaration(&self) -> bool {
        self.apis.iter().any(|api| !api.operations.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Info {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
}

/// Entry of `apis`: a declaration reference or a path with operations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiEntry {
    #[serde(default, deserialize_with = "lenient::string")]
    pub path: String,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,

    #[serde(default)]
    pub operations: Vec<Operation>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    /// HTTP method, usually upper case
    #[serde(default, deserialize_with = "lenient::string")]
    pub method: String,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub summary: Option<String>,

    /// Long description
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub notes: Option<String>,

    /// Operation identifier
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub nickname: Option<String>,

    #[serde(default)]
    pub parameters: Vec<Value>,

    #[serde(rename = "responseMessages")]
    #[serde(default)]
    pub response_messages: Vec<Value>,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub consumes: Vec<String>,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub produces: Vec<String>,

    /// Return type: a primitive or a model name
    #[serde(rename = "type")]
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub response_type: Option<String>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}
