//! Mock response visitor

use super::sample::sample_from_schema;
use crate::visitor::{OperationVisitor, VisitorError};
use serde_json::{json, Value};
use swagger_import_common::{IntermediateOperation, OperationResponse, Policy};

pub const MOCK_ID: &str = "mock";

/// Produces a `mock` policy answering with the operation's success response
///
/// The body is the documented example when there is one, otherwise a sample
/// generated from the response schema.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockVisitor;

impl OperationVisitor for MockVisitor {
    fn id(&self) -> &'static str {
        MOCK_ID
    }

    fn name(&self) -> &'static str {
        "Mock"
    }

    fn visit(
        &self,
        operation: &IntermediateOperation,
        _include_policy_paths: bool,
    ) -> Result<Option<Policy>, VisitorError> {
        let response = operation.success_response();
        let example = response.and_then(|r| r.example.clone());
        mock_policy(operation, response, example)
    }
}

/// OpenAPI 3 flavour: named examples recorded per status win over the
/// response's own example
#[derive(Debug, Default, Clone, Copy)]
pub struct OaiMockVisitor;

impl OperationVisitor for OaiMockVisitor {
    fn id(&self) -> &'static str {
        MOCK_ID
    }

    fn name(&self) -> &'static str {
        "Mock"
    }

    fn visit(
        &self,
        operation: &IntermediateOperation,
        _include_policy_paths: bool,
    ) -> Result<Option<Policy>, VisitorError> {
        let response = operation.success_response();
        let example = response
            .and_then(|r| {
                operation
                    .examples
                    .as_ref()
                    .and_then(|examples| examples.get(&r.status))
                    .cloned()
            })
            .or_else(|| response.and_then(|r| r.example.clone()));
        mock_policy(operation, response, example)
    }
}

fn mock_policy(
    operation: &IntermediateOperation,
    response: Option<&OperationResponse>,
    example: Option<Value>,
) -> Result<Option<Policy>, VisitorError> {
    let body = example.or_else(|| {
        response
            .and_then(|r| r.schema.as_ref())
            .map(sample_from_schema)
    });

    let content = match body {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(value) => serde_json::to_string_pretty(&value)?,
    };

    let media_type = response
        .and_then(|r| r.media_type.clone())
        .or_else(|| operation.produces.first().cloned())
        .unwrap_or_else(|| "application/json".to_string());

    let configuration = json!({
        "status": response.map(|r| mock_status(&r.status)).unwrap_or("200"),
        "headers": [{"name": "Content-Type", "value": media_type}],
        "content": content,
    });

    Ok(Some(Policy::new(MOCK_ID, configuration.to_string())))
}

/// `default` and ranges like `2XX` answer with a plain 200
fn mock_status(status: &str) -> &str {
    if !status.is_empty() && status.chars().all(|c| c.is_ascii_digit()) {
        status
    } else {
        "200"
    }
}
