//! Error types for access checks

use crate::policy::Operation;
use records_dal::{Resource, Role};
use thiserror::Error;

/// Errors surfaced by the guard and the identity seam
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// Role is not in the allow-list for the resource and operation
    #[error("{role} is not allowed to {operation} {resource}")]
    Denied {
        role: Role,
        resource: Resource,
        operation: Operation,
    },

    /// Bearer token failed verification
    #[error("bearer token rejected: {0}")]
    InvalidToken(String),

    /// Token verified but no profile exists for its subject
    #[error("no profile on record for subject {subject_id}")]
    UnknownSubject { subject_id: String },
}

/// Result type alias for access checks
pub type AccessResult<T> = Result<T, AccessError>;
