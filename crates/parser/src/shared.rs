//! Helpers shared by the version adapters

use crate::refs::RefResolver;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use swagger_import_common::Extensions;

/// Keep only `x-*` entries, in document order
pub(crate) fn vendor_extensions(fields: &IndexMap<String, Value>) -> Extensions {
    fields
        .iter()
        .filter(|(key, _)| key.starts_with("x-"))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Entries of a Paths Object that are paths; `x-*` keys are extensions
pub(crate) fn path_entries(
    paths: &IndexMap<String, Value>,
) -> impl Iterator<Item = (&String, &Value)> {
    paths.iter().filter(|(key, _)| !key.starts_with("x-"))
}

/// Prefer a JSON media type, else the first one declared
pub(crate) fn preferred_media<'a, I>(media_types: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let all: Vec<&str> = media_types.into_iter().collect();
    all.iter()
        .copied()
        .find(|m| is_json_media(m))
        .or_else(|| all.first().copied())
}

pub(crate) fn is_json_media(media_type: &str) -> bool {
    let essence = media_type.split(';').next().unwrap_or_default().trim();
    essence == "application/json" || essence.ends_with("+json")
}

/// Schema of a Swagger 1/2 non-body parameter, built from its inline
/// `type`/`format`/`items`/`enum`/`default` keywords
pub(crate) fn inline_parameter_schema(parameter: &Value) -> Option<Value> {
    let object = parameter.as_object()?;
    let mut schema = Map::new();
    for key in [
        "type", "format", "items", "enum", "default", "minimum", "maximum", "pattern",
    ] {
        if let Some(value) = object.get(key) {
            schema.insert(key.to_string(), value.clone());
        }
    }
    if schema.is_empty() {
        None
    } else {
        Some(Value::Object(schema))
    }
}

/// Operation parameters override path parameters with the same name and location
pub(crate) fn merge_parameters<'a>(
    resolver: &RefResolver<'a>,
    path_parameters: &'a [Value],
    operation_parameters: &'a [Value],
) -> Vec<&'a Value> {
    let key = |p: &Value| {
        (
            p.get("name").and_then(Value::as_str).map(String::from),
            p.get("in").and_then(Value::as_str).map(String::from),
        )
    };

    let overrides: Vec<&Value> = operation_parameters
        .iter()
        .map(|p| resolver.shallow(p))
        .collect();

    let mut merged: Vec<&Value> = path_parameters
        .iter()
        .map(|p| resolver.shallow(p))
        .filter(|p| !overrides.iter().any(|o| key(*o) == key(*p)))
        .collect();
    merged.extend(overrides);
    merged
}
