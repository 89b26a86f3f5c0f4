//! OpenAPI 3.x specification adapter
//!
//! Operations come from `paths`; backend targets come from the document-level
//! `servers` (path or operation servers stand in when the document has none).
//! Server URL templates are kept verbatim here and expanded by the importer's
//! target resolver.
//!
//! ## Usage
//! ```rust,ignore
//! use swagger_import_parser::parse_document;
//!
//! let parsed = parse_document(&std::fs::read_to_string("petstore.yaml")?)?;
//! let adapted = parsed.adapt()?;
//! assert_eq!(adapted.servers[0].url, "http://petstore.swagger.io/v1");
//! ```

mod converter;
mod types;

pub use converter::convert;
pub use types::*;
