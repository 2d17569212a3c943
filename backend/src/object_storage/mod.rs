//! S3-based presigning for object uploads
mod error;
mod traced;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::{presigning::PresigningConfig, types::ObjectCannedAcl, Client as S3Client};
use chrono::{DateTime, Utc};

pub use error::{BucketError, BucketResult};
pub use traced::TracedPresigner;

/// Operation a presigned URL authorizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresignOperation {
    /// Single-request object write
    PutObject,
}

/// Canned ACL granted to the uploaded object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectAcl {
    /// Anyone can read the object once uploaded
    PublicRead,
}

impl ObjectAcl {
    /// Header value S3 expects for this ACL
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PublicRead => "public-read",
        }
    }
}

impl From<ObjectAcl> for ObjectCannedAcl {
    fn from(acl: ObjectAcl) -> Self {
        match acl {
            ObjectAcl::PublicRead => Self::PublicRead,
        }
    }
}

/// Parameters of a single presign request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignRequest {
    /// Operation the URL authorizes
    pub operation: PresignOperation,
    /// Target bucket
    pub bucket: String,
    /// Object key inside the bucket
    pub key: String,
    /// How long the URL stays valid
    pub expires_in: Duration,
    /// MIME type the upload must declare
    pub content_type: String,
    /// ACL applied to the uploaded object
    pub acl: ObjectAcl,
}

/// Presigned URL with expiration information
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    /// The presigned URL
    pub url: String,
    /// UTC timestamp when the URL expires
    pub expires_at: DateTime<Utc>,
    /// Headers the uploader must send with the request
    pub headers: Vec<(String, String)>,
}

/// Produces presigned URLs for object storage requests
///
/// Implementations sign locally; no request reaches the storage service until
/// the URL is used.
#[async_trait]
pub trait Presigner: Send + Sync {
    /// Signs `request` and returns the resulting URL
    ///
    /// # Errors
    ///
    /// Returns `BucketError` if the request cannot be signed
    async fn presign(&self, request: &PresignRequest) -> BucketResult<PresignedUrl>;
}

/// `Presigner` backed by the AWS S3 SDK
pub struct S3Presigner {
    s3_client: Arc<S3Client>,
}

impl S3Presigner {
    /// Creates a new presigner
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client holding region and credentials
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>) -> Self {
        Self { s3_client }
    }

    async fn presign_put_object(&self, request: &PresignRequest) -> BucketResult<PresignedUrl> {
        let presigned_config = PresigningConfig::expires_in(request.expires_in).map_err(|e| {
            BucketError::ConfigError(format!("Failed to create presigning config: {e}"))
        })?;

        let presigned_request = self
            .s3_client
            .put_object()
            .bucket(&request.bucket)
            .key(&request.key)
            .content_type(&request.content_type)
            .acl(request.acl.into())
            .presigned(presigned_config)
            .await?;

        let expires_at: DateTime<Utc> = Utc::now() + request.expires_in;

        Ok(PresignedUrl {
            url: presigned_request.uri().to_string(),
            expires_at,
            headers: presigned_request
                .headers()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        })
    }
}

#[async_trait]
impl Presigner for S3Presigner {
    async fn presign(&self, request: &PresignRequest) -> BucketResult<PresignedUrl> {
        match request.operation {
            PresignOperation::PutObject => self.presign_put_object(request).await,
        }
    }
}
