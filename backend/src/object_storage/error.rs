//! Error types for object storage operations

use aws_sdk_s3::{error::SdkError, operation::put_object::PutObjectError};
use thiserror::Error;

/// Result type for object storage operations
pub type BucketResult<T> = Result<T, BucketError>;

/// Errors that can occur while presigning object storage requests
#[derive(Error, Debug)]
pub enum BucketError {
    /// S3 rejected or failed to sign the request
    #[error("S3 service error: {0}")]
    S3Error(String),

    /// Presigning configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<SdkError<PutObjectError>> for BucketError {
    fn from(error: SdkError<PutObjectError>) -> Self {
        Self::S3Error(format!("Failed to generate presigned URL: {error}"))
    }
}
