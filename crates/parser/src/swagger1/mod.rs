//! Swagger 1.x support
//!
//! Handles both self-contained API declarations and resource listings whose
//! declarations are fetched relative to the listing location.

mod converter;
mod parser;
mod types;

pub use converter::convert;
pub use parser::fetch_declarations;
pub use types::*;
