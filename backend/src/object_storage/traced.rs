use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, error};

use super::{BucketResult, PresignRequest, PresignedUrl, Presigner};

/// Wraps a `Presigner` and logs latency and failures of every presign call
pub struct TracedPresigner<P> {
    inner: P,
}

impl<P> TracedPresigner<P> {
    /// Wraps `inner`
    #[must_use]
    pub const fn new(inner: P) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<P: Presigner> Presigner for TracedPresigner<P> {
    async fn presign(&self, request: &PresignRequest) -> BucketResult<PresignedUrl> {
        let started = Instant::now();
        let result = self.inner.presign(request).await;
        let elapsed_ms = started.elapsed().as_millis();

        match &result {
            Ok(presigned) => debug!(
                bucket = %request.bucket,
                key = %request.key,
                operation = ?request.operation,
                elapsed_ms,
                expires_at = %presigned.expires_at,
                "Generated presigned URL"
            ),
            Err(e) => error!(
                bucket = %request.bucket,
                key = %request.key,
                operation = ?request.operation,
                elapsed_ms,
                "Failed to generate presigned URL: {e}"
            ),
        }

        result
    }
}
