//! Common types and utilities for the Swagger/OpenAPI importer
//!
//! This crate contains the shared data model (the intermediate operation list
//! produced by the version adapters and the `ApiDraft` handed back to callers),
//! the error type, and the importer configuration.

pub mod config;
mod draft;
mod operation;

pub use config::{FetchConfig, ImporterConfig, PolicyPhase, PolicyPluginDescriptor, PoliciesConfig};
pub use draft::*;
pub use operation::*;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while importing an API description
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Unable to read API description from {location}: {reason}")]
    UnreachableSource { location: String, reason: String },

    #[error("API description payload is empty")]
    EmptyPayload,

    #[error("Unsupported API description version: {0}")]
    UnsupportedSpecVersion(String),

    #[error("Malformed {version} document: {reason}")]
    MalformedDocument { version: String, reason: String },

    #[error("Operation {method} {path} is declared more than once")]
    DuplicateOperation { path: String, method: HttpMethod },

    #[error("{0}")]
    InvalidConfiguration(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ImportError {
    /// Parse failure within a recognized spec version
    pub fn malformed(version: SpecVersion, reason: impl Into<String>) -> Self {
        ImportError::MalformedDocument {
            version: version.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for importer operations
pub type Result<T> = std::result::Result<T, ImportError>;

/// HTTP methods a rule can match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Connect,
    Options,
    Trace,
    Patch,
}

impl HttpMethod {
    /// All methods, in the order used by the flow schema
    pub const ALL: [HttpMethod; 9] = [
        HttpMethod::Get,
        HttpMethod::Head,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Connect,
        HttpMethod::Options,
        HttpMethod::Trace,
        HttpMethod::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Connect => "CONNECT",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Case-insensitive lookup, so both `get` path-item keys and `GET`
    /// Swagger 1 operation methods resolve
    pub fn from_name(name: &str) -> Option<HttpMethod> {
        HttpMethod::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supported API description versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecVersion {
    Swagger1,
    Swagger2,
    OpenApi3,
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecVersion::Swagger1 => write!(f, "Swagger 1.x"),
            SpecVersion::Swagger2 => write!(f, "Swagger 2.0"),
            SpecVersion::OpenApi3 => write!(f, "OpenAPI 3.x"),
        }
    }
}

/// Where the payload of an [`ImportDescriptor`] comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SourceKind {
    /// Payload is a filesystem path or an `http(s)://` / `file://` URL
    Url,
    /// Payload is the document itself
    Inline,
}

/// Input to a single import call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDescriptor {
    pub source_kind: SourceKind,
    pub payload: String,
    /// Ids of the operation visitors allowed to attach policies
    pub requested_policy_ids: IndexSet<String>,
    pub include_policy_paths: bool,
}

impl ImportDescriptor {
    pub fn inline(payload: impl Into<String>) -> Self {
        Self::new(SourceKind::Inline, payload)
    }

    pub fn url(location: impl Into<String>) -> Self {
        Self::new(SourceKind::Url, location)
    }

    fn new(source_kind: SourceKind, payload: impl Into<String>) -> Self {
        Self {
            source_kind,
            payload: payload.into(),
            requested_policy_ids: IndexSet::new(),
            include_policy_paths: false,
        }
    }

    pub fn with_policies<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requested_policy_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_policy_paths(mut self, include: bool) -> Self {
        self.include_policy_paths = include;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_parsing() {
        assert_eq!(HttpMethod::from_name("get"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::from_name("PATCH"), Some(HttpMethod::Patch));
        assert_eq!(HttpMethod::from_name("fetch"), None);
    }

    #[test]
    fn test_http_method_serializes_uppercase() {
        let json = serde_json::to_string(&HttpMethod::Delete).unwrap();
        assert_eq!(json, "\"DELETE\"");
    }

    #[test]
    fn test_descriptor_builder() {
        let descriptor = ImportDescriptor::inline("{}")
            .with_policies(["mock", "json-validation", "mock"])
            .with_policy_paths(true);

        assert_eq!(descriptor.source_kind, SourceKind::Inline);
        assert_eq!(descriptor.requested_policy_ids.len(), 2);
        assert!(descriptor.include_policy_paths);
    }

    #[test]
    fn test_malformed_error_message() {
        let err = ImportError::malformed(SpecVersion::Swagger2, "paths must be an object");
        assert_eq!(
            err.to_string(),
            "Malformed Swagger 2.0 document: paths must be an object"
        );
    }
}
