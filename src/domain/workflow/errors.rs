//! Graph mutation errors.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, NodeId, ValidationError};

/// Why a delta was rejected. The graph is unchanged whenever one of these
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Node '{0}' is locked by compliance requirements")]
    Forbidden(NodeId),

    #[error("Edge references a missing node: {0}")]
    InvalidReference(NodeId),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl WorkflowError {
    pub fn code(&self) -> ErrorCode {
        match self {
            WorkflowError::NodeNotFound(_) => ErrorCode::NodeNotFound,
            WorkflowError::Forbidden(_) => ErrorCode::NodeLocked,
            WorkflowError::InvalidReference(_) => ErrorCode::InvalidReference,
            WorkflowError::Validation(_) => ErrorCode::ValidationFailed,
        }
    }
}
