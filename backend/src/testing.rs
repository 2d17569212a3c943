//! In-memory collaborators for tests

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use crate::object_storage::{BucketError, BucketResult, PresignRequest, PresignedUrl, Presigner};
use crate::upload_link::{RecordStore, RecordStoreError};

const STATIC_ENDPOINT: &str = "https://storage.test";

/// Presigner that signs nothing and echoes the request parameters into the URL
///
/// Every request it receives is recorded and can be inspected with
/// [`StaticPresigner::requests`].
#[derive(Debug, Default)]
pub struct StaticPresigner {
    failure: Option<String>,
    requests: Mutex<Vec<PresignRequest>>,
}

impl StaticPresigner {
    /// Presigner that rejects every request with `BucketError::S3Error(message)`
    #[must_use]
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            requests: Mutex::default(),
        }
    }

    /// Requests received so far, oldest first
    #[must_use]
    pub fn requests(&self) -> Vec<PresignRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Presigner for StaticPresigner {
    async fn presign(&self, request: &PresignRequest) -> BucketResult<PresignedUrl> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        if let Some(message) = &self.failure {
            return Err(BucketError::S3Error(message.clone()));
        }

        let url = format!(
            "{STATIC_ENDPOINT}/{}/{}?operation={:?}&expires={}&content-type={}&acl={}",
            request.bucket,
            request.key,
            request.operation,
            request.expires_in.as_secs(),
            request.content_type,
            request.acl.as_str(),
        );

        Ok(PresignedUrl {
            url,
            expires_at: Utc::now() + request.expires_in,
            headers: vec![
                ("content-type".to_string(), request.content_type.clone()),
                ("x-amz-acl".to_string(), request.acl.as_str().to_string()),
            ],
        })
    }
}

/// Record store backed by a `HashMap`
#[derive(Debug)]
pub struct InMemoryRecordStore<R> {
    records: HashMap<String, R>,
    unavailable: bool,
}

impl<R> Default for InMemoryRecordStore<R> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            unavailable: false,
        }
    }
}

impl<R> InMemoryRecordStore<R> {
    /// Adds `record` under `identifier`
    #[must_use]
    pub fn with_record(mut self, identifier: &str, record: R) -> Self {
        self.records.insert(identifier.to_string(), record);
        self
    }

    /// Store whose every lookup fails
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            records: HashMap::new(),
            unavailable: true,
        }
    }
}

#[async_trait]
impl<R> RecordStore for InMemoryRecordStore<R>
where
    R: Clone + Send + Sync,
{
    type Record = R;

    async fn get_by_identifier(&self, identifier: &str) -> Result<Option<R>, RecordStoreError> {
        if self.unavailable {
            return Err(RecordStoreError::new("record store is unavailable"));
        }

        Ok(self.records.get(identifier).cloned())
    }
}
