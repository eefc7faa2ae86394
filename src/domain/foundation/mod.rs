//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the workflow engine.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{EdgeId, NodeId, SessionId, SubscriberId, UserId, WorkflowId};
pub use timestamp::Timestamp;
