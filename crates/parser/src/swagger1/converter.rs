//! Converts a Swagger 1.x listing and its declarations to intermediate operations

use super::types::{ApiEntry, Operation, Swagger1Spec};
use crate::lenient::scalar_to_string;
use crate::normalize_path_template;
use crate::shared::{inline_parameter_schema, preferred_media, vendor_extensions};
use indexmap::IndexMap;
use serde_json::Value;
use swagger_import_common::{
    AdaptedSpec, Extensions, HttpMethod, IntermediateOperation, OperationResponse, Parameter,
    ParameterLocation, RequestBody, Result, ServerEntry, SpecVersion,
};
use tracing::warn;

/// Convert a Swagger 1.x spec into an [`AdaptedSpec`]
///
/// Operations declared by the document itself come first, followed by those
/// of every fetched API declaration in listing order.
pub fn convert(spec: &Swagger1Spec, _root: &Value) -> Result<AdaptedSpec> {
    let declarations: Vec<&Swagger1Spec> = std::iter::once(spec)
        .filter(|s| s.is_declaration())
        .chain(spec.declarations.iter())
        .collect();

    let mut operations = Vec::new();
    for declaration in &declarations {
        for api in &declaration.apis {
            convert_api(declaration, api, &mut operations);
        }
    }

    let version = spec
        .api_version
        .clone()
        .or_else(|| declarations.iter().find_map(|d| d.api_version.clone()))
        .unwrap_or_default();

    let base_path = non_blank(spec.base_path.as_deref())
        .or_else(|| declarations.iter().find_map(|d| non_blank(d.base_path.as_deref())));

    let info = spec.info.clone().unwrap_or_default();

    Ok(AdaptedSpec {
        spec_version: SpecVersion::Swagger1,
        title: info.title,
        version,
        description: info.description,
        operations,
        servers: base_path.map(ServerEntry::plain).into_iter().collect(),
        extensions: vendor_extensions(&spec.extra),
        paths_extensions: Extensions::new(),
    })
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.trim_end_matches('/').to_string())
}

fn convert_api(
    declaration: &Swagger1Spec,
    api: &ApiEntry,
    operations: &mut Vec<IntermediateOperation>,
) {
    let path_template = normalize_path_template(&api.path);
    let path_extensions = vendor_extensions(&api.extra);

    for operation in &api.operations {
        let Some(method) = HttpMethod::from_name(&operation.method) else {
            warn!(
                path = %api.path,
                method = %operation.method,
                "skipping operation with unknown HTTP method"
            );
            continue;
        };

        let mut converted = convert_operation(declaration, &path_template, method, operation);
        converted.path_extensions = path_extensions.clone();
        operations.push(converted);
    }
}

fn convert_operation(
    declaration: &Swagger1Spec,
    path_template: &str,
    method: HttpMethod,
    operation: &Operation,
) -> IntermediateOperation {
    let consumes = if operation.consumes.is_empty() {
        declaration.consumes.clone()
    } else {
        operation.consumes.clone()
    };
    let produces = if operation.produces.is_empty() {
        declaration.produces.clone()
    } else {
        operation.produces.clone()
    };

    let mut converted = IntermediateOperation::new(path_template, method);
    converted.operation_id = operation.nickname.clone();
    converted.summary = operation.summary.clone();
    converted.description = operation.notes.clone();
    converted.extensions = vendor_extensions(&operation.extra);

    for raw in &operation.parameters {
        let location = raw
            .get("paramType")
            .and_then(Value::as_str)
            .and_then(ParameterLocation::from_name);
        let required = raw.get("required").and_then(Value::as_bool).unwrap_or(false);

        match location {
            Some(ParameterLocation::Body) => {
                let schema = raw
                    .get("type")
                    .and_then(Value::as_str)
                    .and_then(|name| model_schema(&declaration.models, name))
                    .or_else(|| inline_parameter_schema(raw));
                converted.request_body = Some(RequestBody {
                    media_type: preferred_media(consumes.iter().map(String::as_str))
                        .unwrap_or("application/json")
                        .to_string(),
                    required,
                    schema,
                    example: None,
                });
            }
            Some(location) => {
                let Some(name) = raw.get("name").and_then(scalar_to_string) else {
                    continue;
                };
                converted.parameters.push(Parameter {
                    name,
                    location,
                    required: required || location == ParameterLocation::Path,
                    description: raw
                        .get("description")
                        .and_then(Value::as_str)
                        .map(String::from),
                    schema: inline_parameter_schema(raw),
                });
            }
            None => {}
        }
    }

    let media_type = preferred_media(produces.iter().map(String::as_str)).map(String::from);

    for message in &operation.response_messages {
        let Some(status) = message.get("code").and_then(scalar_to_string) else {
            continue;
        };
        converted.responses.push(OperationResponse {
            status,
            description: message
                .get("message")
                .and_then(Value::as_str)
                .map(String::from),
            media_type: media_type.clone(),
            schema: message
                .get("responseModel")
                .and_then(Value::as_str)
                .and_then(|name| model_schema(&declaration.models, name)),
            example: None,
        });
    }

    // The declared return type describes the success response
    if !converted.responses.iter().any(|r| r.status.starts_with('2')) {
        if let Some(return_type) = operation.response_type.as_deref() {
            if return_type != "void" {
                converted.responses.insert(
                    0,
                    OperationResponse {
                        status: "200".to_string(),
                        description: None,
                        media_type: media_type.clone(),
                        schema: model_schema(&declaration.models, return_type)
                            .or_else(|| primitive_schema(return_type)),
                        example: None,
                    },
                );
            }
        }
    }

    converted.consumes = consumes;
    converted.produces = produces;
    converted
}

/// Model definition as a JSON schema; the Swagger 1 `id` key is dropped
fn model_schema(models: &IndexMap<String, Value>, name: &str) -> Option<Value> {
    let mut model = models.get(name)?.clone();
    if let Some(object) = model.as_object_mut() {
        object.remove("id");
        object.entry("type").or_insert_with(|| Value::from("object"));
    }
    Some(model)
}

fn primitive_schema(type_name: &str) -> Option<Value> {
    match type_name {
        "string" | "integer" | "number" | "boolean" => {
            Some(serde_json::json!({ "type": type_name }))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn spec_of(value: &Value) -> Swagger1Spec {
        Swagger1Spec::deserialize(value).unwrap()
    }

    #[test]
    fn test_self_contained_declaration() {
        let doc = json!({
            "swaggerVersion": "1.2",
            "apiVersion": "1.2.3",
            "basePath": "https://demo.gravitee.io/gateway/echo/",
            "info": {"title": "Echo"},
            "produces": ["application/json"],
            "apis": [{
                "path": "/pets/{petId}",
                "operations": [
                    {"method": "GET", "summary": "Find pet", "notes": "By id", "nickname": "getPet",
                     "type": "Pet",
                     "parameters": [{"name": "petId", "paramType": "path", "type": "string"}]},
                    {"method": "DELETE", "responseMessages": [{"code": 204, "message": "Gone"}]}
                ]
            }],
            "models": {"Pet": {"id": "Pet", "properties": {"name": {"type": "string"}}}}
        });
        let adapted = convert(&spec_of(&doc), &doc).unwrap();

        assert_eq!(adapted.title, "Echo");
        assert_eq!(adapted.version, "1.2.3");
        assert_eq!(
            adapted.servers,
            vec![ServerEntry::plain("https://demo.gravitee.io/gateway/echo")]
        );

        let get = &adapted.operations[0];
        assert_eq!(get.path_template, "/pets/:petId");
        assert_eq!(get.operation_id.as_deref(), Some("getPet"));
        assert_eq!(get.rule_description(), "Find pet");
        assert!(get.parameters[0].required);

        let ok = get.success_response().unwrap();
        assert_eq!(ok.status, "200");
        assert_eq!(ok.schema.as_ref().unwrap()["type"], "object");
        assert!(ok.schema.as_ref().unwrap().get("id").is_none());

        let delete = &adapted.operations[1];
        assert_eq!(delete.method, HttpMethod::Delete);
        assert_eq!(delete.responses[0].status, "204");
    }

    #[test]
    fn test_listing_uses_fetched_declarations() {
        let listing = json!({
            "swaggerVersion": "1.2",
            "info": {"title": "Listing"},
            "apis": [{"path": "/pets"}]
        });
        let declaration = json!({
            "swaggerVersion": "1.2",
            "apiVersion": "2.0",
            "basePath": "http://localhost/api",
            "apis": [{"path": "/pets", "operations": [{"method": "post",
                "parameters": [{"name": "body", "paramType": "body", "type": "Pet"}]}]}],
            "models": {"Pet": {"id": "Pet", "properties": {}}}
        });

        let mut spec = spec_of(&listing);
        spec.declarations.push(spec_of(&declaration));
        let adapted = convert(&spec, &listing).unwrap();

        assert_eq!(adapted.version, "2.0");
        assert_eq!(adapted.servers, vec![ServerEntry::plain("http://localhost/api")]);
        assert_eq!(adapted.operations.len(), 1);
        assert_eq!(adapted.operations[0].method, HttpMethod::Post);
        assert!(adapted.operations[0].request_body.is_some());
    }

    #[test]
    fn test_unknown_method_is_skipped() {
        let doc = json!({
            "swaggerVersion": "1.2",
            "apis": [{"path": "/a", "operations": [{"method": "FETCH"}, {"method": "get"}]}]
        });
        let adapted = convert(&spec_of(&doc), &doc).unwrap();
        assert_eq!(adapted.operations.len(), 1);
        assert!(adapted.servers.is_empty());
    }
}
