//! Request body JSON schema validation visitor

use crate::visitor::{OperationVisitor, VisitorError};
use serde_json::json;
use swagger_import_common::{IntermediateOperation, Policy};

pub const JSON_VALIDATION_ID: &str = "json-validation";

const ERROR_MESSAGE: &str = "{\"error\":\"Bad request\"}";

/// Validates JSON request bodies against the documented schema
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonValidationVisitor;

impl OperationVisitor for JsonValidationVisitor {
    fn id(&self) -> &'static str {
        JSON_VALIDATION_ID
    }

    fn name(&self) -> &'static str {
        "JSON Validation"
    }

    fn visit(
        &self,
        operation: &IntermediateOperation,
        _include_policy_paths: bool,
    ) -> Result<Option<Policy>, VisitorError> {
        let Some(body) = operation.request_body.as_ref() else {
            return Ok(None);
        };
        if !body.media_type.to_ascii_lowercase().contains("json") {
            return Ok(None);
        }
        let Some(schema) = body.schema.as_ref() else {
            return Ok(None);
        };
        if !schema.is_object() {
            return Err(VisitorError::Unsupported {
                visitor: JSON_VALIDATION_ID,
                reason: format!(
                    "request schema of {} {} is not an object",
                    operation.method, operation.path_template
                ),
            });
        }

        let configuration = json!({
            "scope": "REQUEST",
            "errorMessage": ERROR_MESSAGE,
            "schema": serde_json::to_string(schema)?,
        });
        Ok(Some(Policy::new(JSON_VALIDATION_ID, configuration.to_string())))
    }
}
