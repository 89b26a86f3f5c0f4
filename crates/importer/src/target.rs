//! Backend targets and virtual host path resolution

use indexmap::IndexSet;
use swagger_import_common::{Endpoint, EndpointGroup, ServerEntry, DEFAULT_ENDPOINT_GROUP};
use tracing::debug;
use url::Url;

/// Where an imported API is exposed and where it forwards to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTargets {
    pub virtual_host_path: String,
    pub endpoint_targets: Vec<String>,
}

impl ResolvedTargets {
    /// The endpoint group holding every target: `default`, `server1`, ...
    pub fn endpoint_group(&self) -> EndpointGroup {
        let endpoints = self
            .endpoint_targets
            .iter()
            .enumerate()
            .map(|(index, target)| Endpoint {
                name: if index == 0 {
                    "default".to_string()
                } else {
                    format!("server{}", index)
                },
                target: target.clone(),
            })
            .collect();

        EndpointGroup {
            name: DEFAULT_ENDPOINT_GROUP.to_string(),
            endpoints,
        }
    }
}

/// Resolve the servers of a document into targets and a virtual host path
///
/// Without any server the single target is `/`, and the virtual host path is
/// derived from `title` when `include_policy_paths` is set.
pub fn resolve(servers: &[ServerEntry], title: &str, include_policy_paths: bool) -> ResolvedTargets {
    if servers.is_empty() {
        let virtual_host_path = if include_policy_paths {
            title_path(title)
        } else {
            "/".to_string()
        };
        return ResolvedTargets {
            virtual_host_path,
            endpoint_targets: vec!["/".to_string()],
        };
    }

    let endpoint_targets: Vec<String> = servers
        .iter()
        .flat_map(expand_server)
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect();

    let virtual_host_path = endpoint_targets
        .first()
        .map(|target| base_path(target))
        .unwrap_or_else(|| "/".to_string());

    debug!(%virtual_host_path, targets = ?endpoint_targets, "resolved endpoint targets");

    ResolvedTargets {
        virtual_host_path,
        endpoint_targets,
    }
}

/// Concrete URLs of one server entry
///
/// Variables with an enum expand into one URL per value, in declaration
/// order; others take their default. Undeclared placeholders are kept.
///
/// ```
/// use indexmap::IndexMap;
/// use swagger_import_common::{ServerEntry, ServerVariable};
/// use swagger_import_importer::target::expand_server;
///
/// let server = ServerEntry {
///     url: "https://demo.example.com:{port}/v2".to_string(),
///     variables: IndexMap::from([(
///         "port".to_string(),
///         ServerVariable {
///             default: Some("443".to_string()),
///             enum_values: vec!["443".to_string(), "8443".to_string()],
///         },
///     )]),
/// };
/// assert_eq!(
///     expand_server(&server),
///     vec!["https://demo.example.com:443/v2", "https://demo.example.com:8443/v2"]
/// );
/// ```
pub fn expand_server(server: &ServerEntry) -> Vec<String> {
    let url = server.url.trim();
    let mut urls = vec![url.to_string()];

    for (name, variable) in &server.variables {
        let placeholder = format!("{{{}}}", name);
        if !url.contains(&placeholder) {
            continue;
        }

        let values: Vec<&str> = if variable.enum_values.is_empty() {
            variable.default.as_deref().into_iter().collect()
        } else {
            variable.enum_values.iter().map(String::as_str).collect()
        };
        if values.is_empty() {
            continue;
        }

        urls = urls
            .iter()
            .flat_map(|u| values.iter().map(|v| u.replace(&placeholder, v)))
            .collect();
    }

    let mut unique = IndexSet::new();
    urls.retain(|u| unique.insert(u.clone()));

    if urls.iter().any(|u| u.contains('{')) {
        debug!(url, "server URL keeps undeclared variables");
    }
    urls
}

/// Path part of a target, without trailing slash; `/` when empty
fn base_path(target: &str) -> String {
    let path = match Url::parse(target) {
        Ok(url) if url.has_host() => url.path().to_string(),
        _ => {
            let target = target.split(['?', '#']).next().unwrap_or_default();
            match target.split_once("://") {
                Some((_, rest)) => rest.find('/').map(|i| &rest[i..]).unwrap_or_default().to_string(),
                None => target.to_string(),
            }
        }
    };

    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Title lower-cased with everything but letters and digits removed
fn title_path(title: &str) -> String {
    let path: String = title
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();
    if path.is_empty() {
        "/".to_string()
    } else {
        path
    }
}
