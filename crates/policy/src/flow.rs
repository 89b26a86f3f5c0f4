//! JSON schema of a flow configuration

use serde_json::json;
use swagger_import_common::HttpMethod;

/// Schema describing a flow, pretty-printed with a trailing newline
///
/// The text is identical on every call.
pub fn flow_schema() -> String {
    let methods: Vec<&str> = HttpMethod::ALL.iter().map(HttpMethod::as_str).collect();

    let schema = json!({
        "type": "object",
        "id": "apim",
        "properties": {
            "name": {
                "title": "Name",
                "description": "The name of flow. If empty, the name will be generated with the path and methods",
                "type": "string"
            },
            "description": {
                "title": "Description",
                "description": "The description of flow",
                "type": "string"
            },
            "path": {
                "title": "Path",
                "description": "The path of flow",
                "type": "string"
            },
            "methods": {
                "title": "Methods",
                "description": "The methods of flow",
                "type": "array",
                "enum": methods
            },
            "condition": {
                "title": "Condition",
                "description": "The condition of flow",
                "type": "string"
            }
        },
        "required": [],
        "disabled": ["condition"]
    });

    format!("{:#}\n", schema)
}
