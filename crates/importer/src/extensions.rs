//! Vendor extension mapping
//!
//! Documents may carry an `x-graviteeio-definition` object at their root:
//!
//! ```yaml
//! x-graviteeio-definition:
//!   categories: [cat1, cat2]
//!   groups: [group1]
//!   labels: [label1]
//!   tags: [tag1]
//!   visibility: PRIVATE
//!   picture: data:image/png;base64,...
//!   properties:
//!     - key: prop1
//!       value: propValue1
//!   metadata:
//!     - name: meta1
//!       value: 1234
//!       format: NUMERIC
//!   virtualHosts:
//!     - host: myHost
//!       path: myPath
//!       overrideEntrypoint: false
//! ```

use crate::groups::GroupLookup;
use indexmap::{IndexMap, IndexSet};
use serde_json::Value;
use swagger_import_common::{
    ApiDraft, ApiMetadata, Extensions, MetadataFormat, VirtualHost, Visibility,
};
use tracing::{debug, warn};

pub const DEFINITION_EXTENSION: &str = "x-graviteeio-definition";

/// Draft fields contributed by vendor extensions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtensionFragment {
    pub groups: IndexSet<String>,
    pub categories: IndexSet<String>,
    pub tags: IndexSet<String>,
    pub labels: Vec<String>,
    pub properties: IndexMap<String, String>,
    pub metadata: Vec<ApiMetadata>,
    pub visibility: Option<Visibility>,
    pub picture: Option<String>,
    /// Replaces the computed virtual hosts when present
    pub virtual_hosts: Option<Vec<VirtualHost>>,
}

impl ExtensionFragment {
    pub fn apply(self, draft: &mut ApiDraft) {
        draft.groups.extend(self.groups);
        draft.categories.extend(self.categories);
        draft.tags.extend(self.tags);
        for label in self.labels {
            if !draft.labels.contains(&label) {
                draft.labels.push(label);
            }
        }
        draft.properties.extend(self.properties);
        draft.metadata.extend(self.metadata);
        if let Some(visibility) = self.visibility {
            draft.visibility = visibility;
        }
        if self.picture.is_some() {
            draft.picture = self.picture;
        }
        if let Some(virtual_hosts) = self.virtual_hosts {
            draft.proxy.virtual_hosts = virtual_hosts;
        }
    }
}

/// Read the recognized extension of a document; other keys are ignored
pub fn map_extensions(extensions: &Extensions, groups: &dyn GroupLookup) -> ExtensionFragment {
    let mut fragment = ExtensionFragment::default();

    let Some(definition) = extensions.get(DEFINITION_EXTENSION).and_then(Value::as_object) else {
        return fragment;
    };

    for (key, value) in definition {
        match key.as_str() {
            "categories" => fragment.categories.extend(strings(value)),
            "tags" => fragment.tags.extend(strings(value)),
            "labels" => {
                for label in strings(value) {
                    if !fragment.labels.contains(&label) {
                        fragment.labels.push(label);
                    }
                }
            }
            "groups" => {
                for name in strings(value) {
                    let found = groups.find_groups_by_name(&name);
                    if found.is_empty() {
                        debug!(group = %name, "no group matches extension value");
                    }
                    fragment.groups.extend(found.into_iter().map(|g| g.id));
                }
            }
            "properties" => fragment.properties = properties(value),
            "metadata" => fragment.metadata = metadata(value),
            "visibility" => fragment.visibility = visibility(value),
            "picture" => fragment.picture = scalar(value),
            "virtualHosts" => fragment.virtual_hosts = Some(virtual_hosts(value)),
            other => debug!(key = other, "ignoring unknown definition field"),
        }
    }

    fragment
}

/// Scalars as text; numbers and booleans are stringified
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A list of scalars, or a single scalar
fn strings(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(scalar).collect(),
        other => scalar(other).into_iter().collect(),
    }
}

/// `[{key, value}]`, or a plain object
fn properties(value: &Value) -> IndexMap<String, String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| {
                let key = item.get("key").and_then(scalar)?;
                let value = item.get("value").and_then(scalar).unwrap_or_default();
                Some((key, value))
            })
            .collect(),
        Value::Object(members) => members
            .iter()
            .filter_map(|(key, value)| scalar(value).map(|v| (key.clone(), v)))
            .collect(),
        _ => IndexMap::new(),
    }
}

/// `[{name, value, format?}]`; a later entry with the same name overwrites
fn metadata(value: &Value) -> Vec<ApiMetadata> {
    let mut entries: IndexMap<String, ApiMetadata> = IndexMap::new();

    for item in value.as_array().into_iter().flatten() {
        let Some(name) = item.get("name").and_then(scalar) else {
            continue;
        };
        let format = match item.get("format").and_then(Value::as_str) {
            Some(format) => MetadataFormat::from_name(format).unwrap_or_else(|| {
                warn!(metadata = %name, format, "unknown metadata format, using STRING");
                MetadataFormat::String
            }),
            None => MetadataFormat::String,
        };
        entries.insert(
            name.clone(),
            ApiMetadata {
                name,
                value: item.get("value").and_then(scalar).unwrap_or_default(),
                format,
            },
        );
    }

    entries.into_values().collect()
}

fn visibility(value: &Value) -> Option<Visibility> {
    let raw = value.as_str()?;
    match raw.to_ascii_uppercase().as_str() {
        "PUBLIC" => Some(Visibility::Public),
        "PRIVATE" => Some(Visibility::Private),
        _ => {
            warn!(visibility = raw, "ignoring unknown visibility");
            None
        }
    }
}

fn virtual_hosts(value: &Value) -> Vec<VirtualHost> {
    value
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|item| {
            let path = item.get("path").and_then(scalar)?;
            Some(VirtualHost {
                host: item.get("host").and_then(scalar),
                path,
                override_entrypoint: item
                    .get("overrideEntrypoint")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            })
        })
        .collect()
}
