//! Swagger 2.0 type definitions
//!
//! Only the parts the importer reads are typed; parameters, responses and
//! schemas stay as JSON so local `$ref`s can be followed against the root.

use crate::lenient;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Swagger 2.0 document root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Swagger2Spec {
    #[serde(deserialize_with = "lenient::string")]
    pub swagger: String,

    #[serde(default)]
    pub info: Info,

    /// Host (and optional port) serving the API
    #[serde(default)]
    pub host: Option<String>,

    #[serde(rename = "basePath")]
    #[serde(default)]
    pub base_path: Option<String>,

    /// Transfer protocols, first one wins
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub schemes: Vec<String>,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub consumes: Vec<String>,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub produces: Vec<String>,

    /// Path items keyed by raw path, plus `x-*` extensions
    #[serde(default)]
    pub paths: IndexMap<String, Value>,

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

/// Path item; method keys and extensions are kept in document order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    /// Parameters shared by every operation of the path
    #[serde(default)]
    pub parameters: Vec<Value>,

    #[serde(flatten)]
    pub entries: IndexMap<String, Value>,
}

/// HTTP operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId")]
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub operation_id: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub consumes: Vec<String>,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub produces: Vec<String>,

    #[serde(default)]
    pub parameters: Vec<Value>,

    #[serde(default)]
    pub responses: IndexMap<String, Value>,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub tags: Vec<String>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}
