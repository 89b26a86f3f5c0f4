//! Policy generation for imported operations
//!
//! - [`OperationVisitor`]s inspect one operation and may produce a [`Policy`]
//!   (`mock`, `json-validation` and `policy-request-validation` are built in)
//! - [`VisitorRegistry`] keeps them in registration order, with OpenAPI 3
//!   specific replacements
//! - [`PolicyOperationVisitorManager`] runs the visitors a caller asked for
//! - [`PolicyCatalog`] and [`ConfigurationValidator`] check generated
//!   configurations against the policy schemas
//!
//! [`Policy`]: swagger_import_common::Policy

mod catalog;
mod flow;
mod manager;
mod registry;
mod validator;
mod visitor;
pub mod visitors;

pub use catalog::{PolicyCatalog, PolicyDevelopment, PolicyEntity};
pub use flow::flow_schema;
pub use manager::PolicyOperationVisitorManager;
pub use registry::VisitorRegistry;
pub use validator::ConfigurationValidator;
pub use visitor::{OperationVisitor, VisitorError};
