//! Fetching of API declarations referenced by a resource listing

use super::types::Swagger1Spec;
use crate::loader::SpecLoader;
use crate::parse_value;
use serde::Deserialize;
use swagger_import_common::{ImportError, Result, SpecVersion};
use tracing::{debug, warn};

/// Fetch the API declarations a resource listing points at
///
/// Every `apis` entry without operations is a declaration reference. The
/// locations tried, in order, are the listing location with the path
/// appended and the path resolved relative to the listing, each followed by
/// its `.json` variant. References that cannot be read or parsed are
/// skipped with a warning.
pub fn fetch_declarations(
    spec: &mut Swagger1Spec,
    loader: &SpecLoader,
    location: &str,
) -> Result<()> {
    let references: Vec<String> = spec
        .apis
        .iter()
        .filter(|api| api.operations.is_empty() && !api.path.trim().is_empty())
        .map(|api| api.path.trim().to_string())
        .collect();

    for reference in references {
        match fetch_declaration(loader, location, &reference) {
            Ok(declaration) => spec.declarations.push(declaration),
            Err(e) => warn!(%reference, error = %e, "skipping unreadable API declaration"),
        }
    }

    Ok(())
}

fn fetch_declaration(loader: &SpecLoader, location: &str, reference: &str) -> Result<Swagger1Spec> {
    let mut last_error = None;

    for candidate in candidates(location, reference) {
        match loader.read_location(&candidate) {
            Ok(content) => {
                debug!(%candidate, "loaded API declaration");
                let (value, _) = parse_value(&content)?;
                return Swagger1Spec::deserialize(&value).map_err(|e| {
                    ImportError::malformed(
                        SpecVersion::Swagger1,
                        format!("declaration {}: {}", candidate, e),
                    )
                });
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(last_error.unwrap_or_else(|| ImportError::UnreachableSource {
        location: reference.to_string(),
        reason: "no candidate location".to_string(),
    }))
}

fn candidates(location: &str, reference: &str) -> Vec<String> {
    let appended = format!("{}{}", location.trim_end_matches('/'), reference);
    let relative = SpecLoader::resolve_relative(location, reference.trim_start_matches('/'));

    let mut candidates = Vec::new();
    for base in [appended, relative] {
        let with_suffix = format!("{}.json", base);
        for candidate in [base, with_suffix] {
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
    }
    candidates
}
