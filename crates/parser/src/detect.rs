//! Format and version detection

use crate::lenient::scalar_to_string;
use crate::openapi::OpenApiSpec;
use crate::swagger1::Swagger1Spec;
use crate::swagger2::Swagger2Spec;
use serde::de::DeserializeOwned;
use serde_json::Value;
use swagger_import_common::{AdaptedSpec, ImportError, Result, SpecVersion};
use tracing::debug;

/// Encoding of the raw payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Json,
    Yaml,
}

/// Version-specific document model
#[derive(Debug, Clone)]
pub enum DocumentModel {
    Swagger1(Swagger1Spec),
    Swagger2(Swagger2Spec),
    OpenApi3(OpenApiSpec),
}

/// A parsed document together with how it was recognized
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub model: DocumentModel,
    pub version: SpecVersion,
    pub format: SpecFormat,
    /// The untyped document, used to follow local `$ref`s
    pub root: Value,
}

impl ParsedDocument {
    /// Run the version adapter for this document
    pub fn adapt(&self) -> Result<AdaptedSpec> {
        match &self.model {
            DocumentModel::Swagger1(spec) => crate::swagger1::convert(spec, &self.root),
            DocumentModel::Swagger2(spec) => crate::swagger2::convert(spec, &self.root),
            DocumentModel::OpenApi3(spec) => crate::openapi::convert(spec, &self.root),
        }
    }
}

/// Parse a raw payload, JSON first and YAML as fallback
pub fn parse_value(raw: &str) -> Result<(Value, SpecFormat)> {
    if raw.trim().is_empty() {
        return Err(ImportError::EmptyPayload);
    }

    let json_err = match serde_json::from_str::<Value>(raw) {
        Ok(value) => return Ok((value, SpecFormat::Json)),
        Err(e) => e,
    };

    serde_yaml::from_str::<Value>(raw)
        .map(|value| (value, SpecFormat::Yaml))
        .map_err(|yaml_err| ImportError::MalformedDocument {
            version: "API description".to_string(),
            reason: format!(
                "payload is neither JSON ({}) nor YAML ({})",
                json_err, yaml_err
            ),
        })
}

/// Determine the spec version from the top-level marker fields
pub fn detect_version(document: &Value) -> Result<SpecVersion> {
    let Some(object) = document.as_object() else {
        return Err(ImportError::UnsupportedSpecVersion(
            "document is not an object".to_string(),
        ));
    };

    let marker = |key: &str| object.get(key).and_then(scalar_to_string);

    if let Some(openapi) = marker("openapi") {
        return if openapi == "3" || openapi.starts_with("3.") {
            Ok(SpecVersion::OpenApi3)
        } else {
            Err(ImportError::UnsupportedSpecVersion(format!("openapi: {}", openapi)))
        };
    }

    if let Some(swagger) = marker("swagger") {
        return if swagger == "2" || swagger.starts_with("2.") {
            Ok(SpecVersion::Swagger2)
        } else if swagger.starts_with("1.") {
            Ok(SpecVersion::Swagger1)
        } else {
            Err(ImportError::UnsupportedSpecVersion(format!("swagger: {}", swagger)))
        };
    }

    if let Some(swagger_version) = marker("swaggerVersion") {
        return if swagger_version.starts_with("1.") {
            Ok(SpecVersion::Swagger1)
        } else {
            Err(ImportError::UnsupportedSpecVersion(format!(
                "swaggerVersion: {}",
                swagger_version
            )))
        };
    }

    Err(ImportError::UnsupportedSpecVersion(
        "no swagger or openapi version marker".to_string(),
    ))
}

/// Parse a payload into its version-specific document model
pub fn parse_document(raw: &str) -> Result<ParsedDocument> {
    let (root, format) = parse_value(raw)?;
    let version = detect_version(&root)?;
    debug!(?format, %version, "detected API description");

    let model = match version {
        SpecVersion::Swagger1 => DocumentModel::Swagger1(typed(&root, version)?),
        SpecVersion::Swagger2 => DocumentModel::Swagger2(typed(&root, version)?),
        SpecVersion::OpenApi3 => DocumentModel::OpenApi3(typed(&root, version)?),
    };

    Ok(ParsedDocument {
        model,
        version,
        format,
        root,
    })
}

fn typed<T: DeserializeOwned>(root: &Value, version: SpecVersion) -> Result<T> {
    T::deserialize(root).map_err(|e| ImportError::malformed(version, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_is_probed_first() {
        let (_, format) = parse_value(r#"{"openapi": "3.0.1"}"#).unwrap();
        assert_eq!(format, SpecFormat::Json);

        let (value, format) = parse_value("openapi: 3.0.1\ninfo:\n  title: T\n").unwrap();
        assert_eq!(format, SpecFormat::Yaml);
        assert_eq!(value["info"]["title"], "T");
    }

    #[test]
    fn test_blank_payload() {
        assert!(matches!(parse_value("  \n"), Err(ImportError::EmptyPayload)));
    }

    #[test]
    fn test_detect_versions() {
        assert_eq!(
            detect_version(&json!({"swaggerVersion": "1.2"})).unwrap(),
            SpecVersion::Swagger1
        );
        assert_eq!(
            detect_version(&json!({"swagger": "1.2"})).unwrap(),
            SpecVersion::Swagger1
        );
        assert_eq!(
            detect_version(&json!({"swagger": "2.0"})).unwrap(),
            SpecVersion::Swagger2
        );
        assert_eq!(
            detect_version(&json!({"swagger": 2.0})).unwrap(),
            SpecVersion::Swagger2
        );
        assert_eq!(
            detect_version(&json!({"openapi": "3.1.0"})).unwrap(),
            SpecVersion::OpenApi3
        );
    }

    #[test]
    fn test_unsupported_versions() {
        for doc in [
            json!({"openapi": "4.0.0"}),
            json!({"swagger": "3.0"}),
            json!({"info": {"title": "No marker"}}),
            json!(["not", "an", "object"]),
        ] {
            assert!(matches!(
                detect_version(&doc),
                Err(ImportError::UnsupportedSpecVersion(_))
            ));
        }
    }

    #[test]
    fn test_malformed_within_recognized_version() {
        let result = parse_document(r#"{"swagger": "2.0", "paths": ["not", "a", "map"]}"#);
        match result {
            Err(ImportError::MalformedDocument { version, .. }) => {
                assert_eq!(version, "Swagger 2.0")
            }
            other => panic!("expected malformed document, got {:?}", other),
        }
    }
}
