//! Built-in operation visitors

mod json_validation;
mod mock;
mod request_validation;
mod sample;

pub use json_validation::{JsonValidationVisitor, JSON_VALIDATION_ID};
pub use mock::{MockVisitor, OaiMockVisitor, MOCK_ID};
pub use request_validation::{RequestValidationVisitor, REQUEST_VALIDATION_ID};
