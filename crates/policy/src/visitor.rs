//! The operation visitor capability

use swagger_import_common::{IntermediateOperation, Policy};
use thiserror::Error;

/// Failure of a single visitor on a single operation
///
/// Never fatal for an import: the manager logs it and attaches no policy.
#[derive(Error, Debug)]
pub enum VisitorError {
    #[error("{visitor}: {reason}")]
    Unsupported {
        visitor: &'static str,
        reason: String,
    },

    #[error("Cannot serialize policy configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Inspects one operation and may produce a policy for its rule
///
/// Visitors are identified by a stable id; callers select them by listing
/// ids in the import descriptor.
#[cfg_attr(test, mockall::automock)]
pub trait OperationVisitor: Send + Sync {
    /// Stable identifier, also the name of the produced policy
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    fn visit(
        &self,
        operation: &IntermediateOperation,
        include_policy_paths: bool,
    ) -> Result<Option<Policy>, VisitorError>;
}
