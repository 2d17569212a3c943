//! Error types for upload link issuing

use thiserror::Error;
use todo_storage::todo::TodoStorageError;

use crate::object_storage::BucketError;

/// Result type for upload link operations
pub type UploadLinkResult<T> = Result<T, UploadLinkError>;

/// Failure of a record store lookup
#[derive(Error, Debug)]
#[error("{0}")]
pub struct RecordStoreError(String);

impl RecordStoreError {
    /// Creates an error from a human readable message
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<TodoStorageError> for RecordStoreError {
    fn from(error: TodoStorageError) -> Self {
        Self(error.to_string())
    }
}

/// Errors that can occur while issuing an upload link
#[derive(Error, Debug)]
pub enum UploadLinkError {
    /// The identifier was empty
    #[error("Identifier must not be empty")]
    InvalidIdentifier,

    /// The object storage client rejected the signing request
    #[error("Storage signing error: {0}")]
    StorageSigning(#[from] BucketError),

    /// The record store lookup failed
    #[error("Record store unavailable: {0}")]
    RecordStoreUnavailable(#[from] RecordStoreError),
}
