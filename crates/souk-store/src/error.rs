//! Storage error types.

use thiserror::Error;

/// Errors that can occur in storage operations.
///
/// A storage failure is all-or-nothing per operation: a batch read either
/// returns its found subset or fails entirely, so callers never face a
/// partially-resolved result.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A read or write was rejected by the backend.
    #[error("Store operation failed: {0}")]
    OperationFailed(String),

    /// No record matched when one was required.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A shared-state lock was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    LockPoisoned,

    /// Failed to (de)serialize a stored record.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}
