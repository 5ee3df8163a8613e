//! Error types for the records DAL

use document_store::StoreError;
use thiserror::Error;

/// Errors surfaced by DAL operations
#[derive(Error, Debug)]
pub enum DalError {
    /// Draft or patch rejected before any store round trip
    #[error("Validation error: {0}")]
    Validation(String),

    /// No record with the given identifier in the collection
    #[error("Record not found: {resource}/{id}")]
    NotFound { resource: String, id: String },

    /// Query could not be executed as written
    #[error("Query failed: {0}")]
    Query(String),

    /// Backing store unreachable
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl DalError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }
}

impl From<StoreError> for DalError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { collection, id } => Self::NotFound {
                resource: collection,
                id,
            },
            StoreError::InvalidCursor(msg) | StoreError::QueryRejected(msg) => Self::Query(msg),
            StoreError::Serialization(err) => Self::Query(err.to_string()),
            StoreError::Unavailable(msg) => Self::Unavailable(msg),
        }
    }
}

/// Result type alias for DAL operations
pub type DalResult<T> = Result<T, DalError>;
