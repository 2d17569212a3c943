//! Error types for todo storage operations

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use thiserror::Error;

/// Result type alias for storage operations
pub type TodoStorageResult<T> = Result<T, TodoStorageError>;

/// Storage error types for todo operations
#[derive(Debug, Error)]
pub enum TodoStorageError {
    /// Failed to get todo item from `DynamoDB`
    #[error("Failed to get todo item from DynamoDB: {0:?}")]
    DynamoDbGetError(#[from] SdkError<GetItemError>),

    /// Failed to parse todo item from `DynamoDB` item
    #[error("Failed to parse todo item: {0}")]
    SerializationError(String),
}

impl From<serde_dynamo::Error> for TodoStorageError {
    fn from(err: serde_dynamo::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
