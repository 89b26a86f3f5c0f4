//! Converts a Swagger 2.0 document to the intermediate operation list

use super::types::{Operation, PathItem, Swagger2Spec};
use crate::normalize_path_template;
use crate::refs::RefResolver;
use crate::shared::{
    inline_parameter_schema, merge_parameters, path_entries, preferred_media, vendor_extensions,
};
use serde::Deserialize;
use serde_json::Value;
use swagger_import_common::{
    AdaptedSpec, HttpMethod, ImportError, IntermediateOperation, OperationResponse, Parameter,
    ParameterLocation, RequestBody, Result, ServerEntry, SpecVersion,
};

/// Convert a Swagger 2.0 spec into an [`AdaptedSpec`]
pub fn convert(spec: &Swagger2Spec, root: &Value) -> Result<AdaptedSpec> {
    let resolver = RefResolver::new(root);
    let mut operations = Vec::new();

    for (raw_path, item) in path_entries(&spec.paths) {
        let item = PathItem::deserialize(item).map_err(|e| {
            ImportError::malformed(SpecVersion::Swagger2, format!("path item {}: {}", raw_path, e))
        })?;
        let path_template = normalize_path_template(raw_path);
        let path_extensions = vendor_extensions(&item.entries);

        for (key, value) in &item.entries {
            let Some(method) = path_item_method(key) else {
                continue;
            };

            let operation = Operation::deserialize(value).map_err(|e| {
                ImportError::malformed(
                    SpecVersion::Swagger2,
                    format!("operation {} {}: {}", method, raw_path, e),
                )
            })?;

            let mut converted = convert_operation(
                spec,
                &resolver,
                &path_template,
                method,
                &item.parameters,
                &operation,
            );
            converted.path_extensions = path_extensions.clone();
            operations.push(converted);
        }
    }

    Ok(AdaptedSpec {
        spec_version: SpecVersion::Swagger2,
        title: spec.info.title.clone(),
        version: spec.info.version.clone(),
        description: spec.info.description.clone(),
        operations,
        servers: servers(spec),
        extensions: vendor_extensions(&spec.extra),
        paths_extensions: vendor_extensions(&spec.paths),
    })
}

/// Method keys a path item may carry
pub(crate) fn path_item_method(key: &str) -> Option<HttpMethod> {
    HttpMethod::from_name(key).filter(|m| *m != HttpMethod::Connect)
}

fn convert_operation(
    spec: &Swagger2Spec,
    resolver: &RefResolver<'_>,
    path_template: &str,
    method: HttpMethod,
    path_parameters: &[Value],
    operation: &Operation,
) -> IntermediateOperation {
    let consumes = if operation.consumes.is_empty() {
        spec.consumes.clone()
    } else {
        operation.consumes.clone()
    };
    let produces = if operation.produces.is_empty() {
        spec.produces.clone()
    } else {
        operation.produces.clone()
    };

    let mut converted = IntermediateOperation::new(path_template, method);
    converted.operation_id = operation.operation_id.clone();
    converted.summary = operation.summary.clone();
    converted.description = operation.description.clone();
    converted.extensions = vendor_extensions(&operation.extra);

    for raw in merge_parameters(resolver, path_parameters, &operation.parameters) {
        let location = raw
            .get("in")
            .and_then(Value::as_str)
            .and_then(ParameterLocation::from_name);
        let required = raw.get("required").and_then(Value::as_bool).unwrap_or(false);

        match location {
            Some(ParameterLocation::Body) => {
                let schema = raw.get("schema").map(|s| resolver.inline(s));
                let example = schema
                    .as_ref()
                    .and_then(|s| s.get("example").cloned())
                    .or_else(|| raw.get("x-example").cloned());
                converted.request_body = Some(RequestBody {
                    media_type: preferred_media(consumes.iter().map(String::as_str))
                        .unwrap_or("application/json")
                        .to_string(),
                    required,
                    schema,
                    example,
                });
            }
            Some(location) => {
                let Some(name) = raw.get("name").and_then(Value::as_str) else {
                    continue;
                };
                converted.parameters.push(Parameter {
                    name: name.to_string(),
                    location,
                    required: required || location == ParameterLocation::Path,
                    description: raw
                        .get("description")
                        .and_then(Value::as_str)
                        .map(String::from),
                    schema: inline_parameter_schema(raw).map(|s| resolver.inline(&s)),
                });
            }
            None => {}
        }
    }

    for (status, raw) in &operation.responses {
        if status.starts_with("x-") {
            continue;
        }
        converted
            .responses
            .push(convert_response(resolver, status, raw, &produces));
    }

    converted.consumes = consumes;
    converted.produces = produces;
    converted
}

fn convert_response(
    resolver: &RefResolver<'_>,
    status: &str,
    raw: &Value,
    produces: &[String],
) -> OperationResponse {
    let response = resolver.shallow(raw);
    let schema = response.get("schema").map(|s| resolver.inline(s));
    let examples = response.get("examples").and_then(Value::as_object);

    let media_type = examples
        .and_then(|ex| preferred_media(ex.keys().map(String::as_str)))
        .or_else(|| preferred_media(produces.iter().map(String::as_str)))
        .map(String::from);

    let example = examples
        .and_then(|ex| media_type.as_deref().and_then(|m| ex.get(m)))
        .cloned()
        .or_else(|| schema.as_ref().and_then(|s| s.get("example").cloned()));

    OperationResponse {
        status: status.to_string(),
        description: response
            .get("description")
            .and_then(Value::as_str)
            .map(String::from),
        media_type,
        schema,
        example,
    }
}

/// `scheme://host + basePath`, or the bare base path when no host is declared
fn servers(spec: &Swagger2Spec) -> Vec<ServerEntry> {
    let base_path = spec
        .base_path
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            if p.starts_with('/') {
                p.to_string()
            } else {
                format!("/{}", p)
            }
        });

    match spec.host.as_deref().map(str::trim).filter(|h| !h.is_empty()) {
        Some(host) => {
            let scheme = spec
                .schemes
                .first()
                .map(|s| s.to_ascii_lowercase())
                .unwrap_or_else(|| "https".to_string());
            vec![ServerEntry::plain(format!(
                "{}://{}{}",
                scheme,
                host.trim_end_matches('/'),
                base_path.unwrap_or_default()
            ))]
        }
        None => base_path.map(ServerEntry::plain).into_iter().collect(),
    }
}
