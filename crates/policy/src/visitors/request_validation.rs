//! Required parameter validation visitor

use crate::visitor::{OperationVisitor, VisitorError};
use serde_json::{json, Value};
use swagger_import_common::{IntermediateOperation, Parameter, ParameterLocation, Policy};

pub const REQUEST_VALIDATION_ID: &str = "policy-request-validation";

/// Rejects requests missing required query or header parameters
///
/// Path parameters are checked too when policy paths are generated, since
/// the gateway then exposes the templated paths themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestValidationVisitor;

impl OperationVisitor for RequestValidationVisitor {
    fn id(&self) -> &'static str {
        REQUEST_VALIDATION_ID
    }

    fn name(&self) -> &'static str {
        "Validate Request"
    }

    fn visit(
        &self,
        operation: &IntermediateOperation,
        include_policy_paths: bool,
    ) -> Result<Option<Policy>, VisitorError> {
        let rules: Vec<Value> = operation
            .parameters
            .iter()
            .filter(|p| p.required)
            .filter_map(|p| rule_for(p, include_policy_paths))
            .collect();

        if rules.is_empty() {
            return Ok(None);
        }

        let configuration = json!({
            "scope": "REQUEST",
            "status": "400",
            "rules": rules,
        });
        Ok(Some(Policy::new(REQUEST_VALIDATION_ID, configuration.to_string())))
    }
}

fn rule_for(parameter: &Parameter, include_policy_paths: bool) -> Option<Value> {
    let input = match parameter.location {
        ParameterLocation::Query => format!("{{#request.params['{}']}}", parameter.name),
        ParameterLocation::Header => format!("{{#request.headers['{}']}}", parameter.name),
        ParameterLocation::Path if include_policy_paths => {
            format!("{{#request.pathParams['{}']}}", parameter.name)
        }
        _ => return None,
    };

    Some(json!({
        "input": input,
        "constraint": {"type": "NOT_NULL", "parameters": []},
    }))
}
