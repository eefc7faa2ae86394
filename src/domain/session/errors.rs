//! Session-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, ValidationError};
use crate::domain::workflow::WorkflowError;

/// Errors returned across the session boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No session with that id is registered.
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    /// The session was cleaned up while the request waited for it.
    #[error("Session {0} has been closed")]
    Closed(SessionId),

    /// The delta was rejected by the graph mutator.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl SessionError {
    pub fn not_found(id: SessionId) -> Self {
        SessionError::NotFound(id)
    }

    pub fn closed(id: SessionId) -> Self {
        SessionError::Closed(id)
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::Closed(_) => ErrorCode::SessionClosed,
            SessionError::Workflow(err) => err.code(),
            SessionError::Validation(err) => ErrorCode::from(err),
        }
    }

    /// Flattens the error for the transport layer.
    pub fn to_domain_error(&self) -> DomainError {
        let error = DomainError::new(self.code(), self.to_string());
        match self {
            SessionError::NotFound(id) | SessionError::Closed(id) => {
                error.with_detail("session_id", id.to_string())
            }
            SessionError::Workflow(
                WorkflowError::NodeNotFound(node_id)
                | WorkflowError::Forbidden(node_id)
                | WorkflowError::InvalidReference(node_id),
            ) => error.with_detail("node_id", node_id.to_string()),
            SessionError::Workflow(WorkflowError::Validation(err)) | SessionError::Validation(err) => {
                error.with_detail("field", err.field())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::NodeId;

    #[test]
    fn workflow_errors_keep_their_code() {
        let err = SessionError::from(WorkflowError::Forbidden(NodeId::from("phi")));
        assert_eq!(err.code(), ErrorCode::NodeLocked);
        assert_eq!(err.to_string(), "Node 'phi' is locked by compliance requirements");
    }

    #[test]
    fn to_domain_error_carries_node_detail() {
        let err = SessionError::from(WorkflowError::InvalidReference(NodeId::from("ghost")));
        let domain = err.to_domain_error();
        assert_eq!(domain.code, ErrorCode::InvalidReference);
        assert_eq!(domain.details.get("node_id").map(String::as_str), Some("ghost"));
    }

    #[test]
    fn not_found_carries_session_detail() {
        let id = SessionId::new();
        let domain = SessionError::not_found(id).to_domain_error();
        assert_eq!(domain.code, ErrorCode::SessionNotFound);
        assert_eq!(domain.details.get("session_id"), Some(&id.to_string()));
    }

    #[test]
    fn validation_maps_field_code() {
        let err = SessionError::from(ValidationError::empty_field("user_id"));
        assert_eq!(err.code(), ErrorCode::EmptyField);
        assert_eq!(
            err.to_domain_error().details.get("field").map(String::as_str),
            Some("user_id")
        );
    }
}
