//! Sample values generated from JSON schemas

use serde_json::{json, Map, Value};

const MAX_DEPTH: usize = 8;

/// Build a representative value for a schema
///
/// `example`, then `default`, then the first `enum` value take precedence over
/// type-based generation. Composition keywords use their first branch, except
/// `allOf` whose object members are merged.
pub(crate) fn sample_from_schema(schema: &Value) -> Value {
    sample(schema, 0)
}

fn sample(schema: &Value, depth: usize) -> Value {
    let Some(object) = schema.as_object() else {
        return Value::Null;
    };
    if depth > MAX_DEPTH {
        return Value::Null;
    }

    for key in ["example", "default"] {
        if let Some(value) = object.get(key) {
            return value.clone();
        }
    }
    if let Some(first) = object.get("enum").and_then(Value::as_array).and_then(|e| e.first()) {
        return first.clone();
    }

    if let Some(parts) = object.get("allOf").and_then(Value::as_array) {
        let mut merged = Map::new();
        for part in parts {
            if let Value::Object(members) = sample(part, depth + 1) {
                merged.extend(members);
            }
        }
        return Value::Object(merged);
    }
    for key in ["oneOf", "anyOf"] {
        if let Some(first) = object.get(key).and_then(Value::as_array).and_then(|b| b.first()) {
            return sample(first, depth + 1);
        }
    }

    let type_name = object.get("type").and_then(Value::as_str).or_else(|| {
        if object.contains_key("properties") {
            Some("object")
        } else if object.contains_key("items") {
            Some("array")
        } else {
            None
        }
    });

    match type_name {
        Some("object") => {
            let mut members = Map::new();
            if let Some(properties) = object.get("properties").and_then(Value::as_object) {
                for (name, property) in properties {
                    members.insert(name.clone(), sample(property, depth + 1));
                }
            }
            Value::Object(members)
        }
        Some("array") => match object.get("items") {
            Some(items) => Value::Array(vec![sample(items, depth + 1)]),
            None => json!([]),
        },
        Some("string") => json!(string_sample(
            object.get("format").and_then(Value::as_str)
        )),
        Some("integer") => object.get("minimum").cloned().unwrap_or_else(|| json!(0)),
        Some("number") => object.get("minimum").cloned().unwrap_or_else(|| json!(0.0)),
        Some("boolean") => json!(true),
        _ => Value::Null,
    }
}

fn string_sample(format: Option<&str>) -> &'static str {
    match format {
        Some("date") => "2019-08-24",
        Some("date-time") => "2019-08-24T14:15:22Z",
        Some("email") => "user@example.com",
        Some("uuid") => "095be615-a8ad-4c33-8e9c-c7612fbf6c9f",
        Some("uri") | Some("url") => "http://example.com",
        _ => "string",
    }
}
