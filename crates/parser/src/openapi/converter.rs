//! Converts an OpenAPI 3.x document to the intermediate operation list

use super::types::{OpenApiSpec, Operation, PathItem, Server};
use crate::normalize_path_template;
use crate::refs::RefResolver;
use crate::shared::{merge_parameters, path_entries, preferred_media, vendor_extensions};
use crate::swagger2::path_item_method;
use serde::Deserialize;
use serde_json::{Map, Value};
use swagger_import_common::{
    AdaptedSpec, ImportError, IntermediateOperation, OperationResponse, Parameter,
    ParameterLocation, RequestBody, Result, ServerEntry, ServerVariable, SpecVersion,
};
use tracing::warn;

/// Convert an OpenAPI 3.x spec into an [`AdaptedSpec`]
pub fn convert(spec: &OpenApiSpec, root: &Value) -> Result<AdaptedSpec> {
    let resolver = RefResolver::new(root);
    let mut operations = Vec::new();
    let mut fallback_servers: Option<Vec<Server>> = None;

    for (raw_path, declared) in path_entries(&spec.paths) {
        let declared = PathItem::deserialize(declared).map_err(|e| {
            ImportError::malformed(SpecVersion::OpenApi3, format!("path item {}: {}", raw_path, e))
        })?;
        let Some(item) = resolve_path_item(&resolver, raw_path, &declared)? else {
            continue;
        };
        let path_template = normalize_path_template(raw_path);
        let path_extensions = vendor_extensions(&item.entries);

        if fallback_servers.is_none() {
            fallback_servers = declared_servers(item.entries.get("servers"));
        }

        for (key, value) in &item.entries {
            let Some(method) = path_item_method(key) else {
                continue;
            };

            let operation = Operation::deserialize(value).map_err(|e| {
                ImportError::malformed(
                    SpecVersion::OpenApi3,
                    format!("operation {} {}: {}", method, raw_path, e),
                )
            })?;

            if fallback_servers.is_none() {
                fallback_servers = declared_servers(operation.extra.get("servers"));
            }

            let mut converted = IntermediateOperation::new(&path_template, method);
            converted.operation_id = operation.operation_id.clone();
            converted.summary = operation.summary.clone();
            converted.description = operation.description.clone();
            converted.path_extensions = path_extensions.clone();
            converted.extensions = vendor_extensions(&operation.extra);
            converted.callbacks = operation.callbacks.clone();

            fill_parameters(&mut converted, &resolver, &item.parameters, &operation);
            fill_request_body(&mut converted, &resolver, &operation);
            fill_responses(&mut converted, &resolver, &operation);

            operations.push(converted);
        }
    }

    // Document-level servers win; operation or path servers only stand in
    // when the document declares none.
    let servers = if spec.servers.is_empty() {
        fallback_servers.unwrap_or_default()
    } else {
        spec.servers.clone()
    };

    Ok(AdaptedSpec {
        spec_version: SpecVersion::OpenApi3,
        title: spec.info.title.clone(),
        version: spec.info.version.clone(),
        description: spec.info.description.clone(),
        operations,
        servers: servers.iter().map(server_entry).collect(),
        extensions: vendor_extensions(&spec.extra),
        paths_extensions: vendor_extensions(&spec.paths),
    })
}

/// Follow a path item `$ref`; unresolvable references are skipped
fn resolve_path_item(
    resolver: &RefResolver<'_>,
    raw_path: &str,
    declared: &PathItem,
) -> Result<Option<PathItem>> {
    let Some(reference) = declared.entries.get("$ref").and_then(Value::as_str) else {
        return Ok(Some(declared.clone()));
    };

    match resolver.lookup(reference) {
        Some(target) => PathItem::deserialize(target).map(Some).map_err(|e| {
            ImportError::malformed(
                SpecVersion::OpenApi3,
                format!("path item {} ({}): {}", raw_path, reference, e),
            )
        }),
        None => {
            warn!(path = raw_path, reference, "skipping path item with unresolvable $ref");
            Ok(None)
        }
    }
}

fn declared_servers(value: Option<&Value>) -> Option<Vec<Server>> {
    let servers: Vec<Server> = Vec::<Server>::deserialize(value?).ok()?;
    if servers.is_empty() {
        None
    } else {
        Some(servers)
    }
}

fn server_entry(server: &Server) -> ServerEntry {
    ServerEntry {
        url: server.url.clone(),
        variables: server
            .variables
            .iter()
            .map(|(name, variable)| {
                (
                    name.clone(),
                    ServerVariable {
                        default: variable.default.clone(),
                        enum_values: variable.enum_values.clone(),
                    },
                )
            })
            .collect(),
    }
}

fn fill_parameters(
    converted: &mut IntermediateOperation,
    resolver: &RefResolver<'_>,
    path_parameters: &[Value],
    operation: &Operation,
) {
    for raw in merge_parameters(resolver, path_parameters, &operation.parameters) {
        let Some(name) = raw.get("name").and_then(Value::as_str) else {
            continue;
        };
        let Some(location) = raw
            .get("in")
            .and_then(Value::as_str)
            .and_then(ParameterLocation::from_name)
        else {
            continue;
        };

        let required = raw.get("required").and_then(Value::as_bool).unwrap_or(false);
        converted.parameters.push(Parameter {
            name: name.to_string(),
            location,
            required: required || location == ParameterLocation::Path,
            description: raw
                .get("description")
                .and_then(Value::as_str)
                .map(String::from),
            schema: raw.get("schema").map(|s| resolver.inline(s)),
        });
    }
}

fn fill_request_body(
    converted: &mut IntermediateOperation,
    resolver: &RefResolver<'_>,
    operation: &Operation,
) {
    let Some(raw) = operation.request_body.as_ref() else {
        return;
    };
    let body = resolver.shallow(raw);
    let Some(content) = body.get("content").and_then(Value::as_object) else {
        return;
    };

    converted.consumes = content.keys().cloned().collect();
    let Some(media_type) = preferred_media(content.keys().map(String::as_str)) else {
        return;
    };

    let media = &content[media_type];
    let schema = media.get("schema").map(|s| resolver.inline(s));
    let example = media_example(resolver, media, schema.as_ref());

    if let Some(example) = example.as_ref() {
        record_example(converted, "requestBody", example);
    }

    converted.request_body = Some(RequestBody {
        media_type: media_type.to_string(),
        required: body.get("required").and_then(Value::as_bool).unwrap_or(false),
        schema,
        example,
    });
}

fn fill_responses(
    converted: &mut IntermediateOperation,
    resolver: &RefResolver<'_>,
    operation: &Operation,
) {
    let mut links = Map::new();

    for (status, raw) in &operation.responses {
        if status.starts_with("x-") {
            continue;
        }
        let response = resolver.shallow(raw);
        let content = response.get("content").and_then(Value::as_object);

        if let Some(content) = content {
            for media_type in content.keys() {
                if !converted.produces.contains(media_type) {
                    converted.produces.push(media_type.clone());
                }
            }
        }

        if let Some(response_links) = response.get("links") {
            links.insert(status.clone(), resolver.inline(response_links));
        }

        let media_type = content.and_then(|c| preferred_media(c.keys().map(String::as_str)));
        let media = media_type.and_then(|m| content.and_then(|c| c.get(m)));
        let schema = media
            .and_then(|m| m.get("schema"))
            .map(|s| resolver.inline(s));
        let example = media.and_then(|m| media_example(resolver, m, schema.as_ref()));

        if let Some(example) = example.as_ref() {
            record_example(converted, status, example);
        }

        converted.responses.push(OperationResponse {
            status: status.clone(),
            description: response
                .get("description")
                .and_then(Value::as_str)
                .map(String::from),
            media_type: media_type.map(String::from),
            schema,
            example,
        });
    }

    if !links.is_empty() {
        converted.links = Some(Value::Object(links));
    }
}

/// `example`, else the first of `examples`, else the schema's own example
fn media_example(resolver: &RefResolver<'_>, media: &Value, schema: Option<&Value>) -> Option<Value> {
    if let Some(example) = media.get("example") {
        return Some(example.clone());
    }

    let first_named = media
        .get("examples")
        .and_then(Value::as_object)
        .and_then(|examples| examples.values().next())
        .map(|example| resolver.shallow(example))
        .and_then(|example| example.get("value"))
        .cloned();

    first_named.or_else(|| schema.and_then(|s| s.get("example").cloned()))
}

fn record_example(converted: &mut IntermediateOperation, key: &str, example: &Value) {
    let examples = converted
        .examples
        .get_or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(map) = examples {
        map.insert(key.to_string(), example.clone());
    }
}
