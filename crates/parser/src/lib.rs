//! API description parsing
//!
//! This crate turns a raw Swagger/OpenAPI payload into the version-independent
//! [`AdaptedSpec`] consumed by the importer.
//!
//! ## Parsing Strategy
//!
//! 1. [`SpecLoader`] reads the payload (inline, file, or `http(s)://`)
//! 2. [`parse_document`] probes JSON then YAML and detects the spec version
//!    from the top-level marker:
//!    - `swaggerVersion`/`swagger` `1.x` → Swagger 1
//!    - `swagger: "2.0"` → Swagger 2
//!    - `openapi: "3.x"` → OpenAPI 3
//! 3. The matching version adapter lowers the document into
//!    [`IntermediateOperation`](swagger_import_common::IntermediateOperation)s
//!    with `:name` path placeholders and the server list.

mod detect;
mod lenient;
pub mod loader;
pub mod openapi;
mod path_template;
mod refs;
mod shared;
pub mod swagger1;
pub mod swagger2;

pub use detect::{detect_version, parse_document, parse_value, DocumentModel, ParsedDocument, SpecFormat};
pub use loader::SpecLoader;
pub use path_template::normalize_path_template;

use swagger_import_common::{AdaptedSpec, ImportDescriptor, Result, SourceKind};

/// Load, parse and adapt the document an [`ImportDescriptor`] points at
///
/// Swagger 1 resource listings loaded from a location get their referenced
/// API declarations fetched relative to that location.
pub fn load_and_adapt(loader: &SpecLoader, descriptor: &ImportDescriptor) -> Result<AdaptedSpec> {
    let content = loader.load(descriptor)?;
    let mut parsed = parse_document(&content)?;

    if let (SourceKind::Url, DocumentModel::Swagger1(spec)) =
        (descriptor.source_kind, &mut parsed.model)
    {
        swagger1::fetch_declarations(spec, loader, &descriptor.payload)?;
    }

    parsed.adapt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_and_adapt_inline() {
        let descriptor = ImportDescriptor::inline(
            r#"{"openapi": "3.0.0", "info": {"title": "T", "version": "1"}, "paths": {"/a/{id}": {"get": {}}}}"#,
        );
        let adapted = load_and_adapt(&SpecLoader::default(), &descriptor).unwrap();
        assert_eq!(adapted.operations.len(), 1);
        assert_eq!(adapted.operations[0].path_template, "/a/:id");
    }
}
