//! Swagger 2.0 specification adapter
//!
//! Operations come from `paths`; the backend target is assembled from
//! `schemes[0]`, `host` and `basePath`.
//!
//! ## Usage
//! ```rust,ignore
//! use swagger_import_parser::parse_document;
//!
//! let parsed = parse_document(&std::fs::read_to_string("swagger.yaml")?)?;
//! let adapted = parsed.adapt()?;
//! ```

mod converter;
mod types;

pub use converter::convert;
pub(crate) use converter::path_item_method;
pub use types::*;
