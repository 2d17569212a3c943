//! Issues presigned upload links paired with the record they belong to
mod error;
mod record_store;

use std::sync::Arc;
use std::time::Duration;

use todo_storage::todo::TodoItem;
use tracing::{info, instrument};

use crate::object_storage::{ObjectAcl, PresignOperation, PresignRequest, PresignedUrl, Presigner};

pub use error::{RecordStoreError, UploadLinkError, UploadLinkResult};
pub use record_store::RecordStore;

/// Lifetime of every issued upload link
pub const UPLOAD_LINK_EXPIRY_SECS: u64 = 3600;

/// Fixed parameters of the upload links an issuer hands out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadLinkConfig {
    /// Bucket every object is uploaded to
    pub bucket_name: String,
    /// How long a presigned URL stays valid
    pub expiry: Duration,
}

impl UploadLinkConfig {
    /// Config for `bucket_name` with the standard one hour expiry
    #[must_use]
    pub fn new(bucket_name: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            expiry: Duration::from_secs(UPLOAD_LINK_EXPIRY_SECS),
        }
    }

    /// Public HTTPS endpoint of the bucket, without a trailing slash
    #[must_use]
    pub fn public_endpoint(&self) -> String {
        format!("https://{}.s3.amazonaws.com", self.bucket_name)
    }

    /// Public URL an object under `key` is served from once uploaded
    #[must_use]
    pub fn public_object_url(&self, key: &str) -> String {
        format!("{}/{key}", self.public_endpoint())
    }
}

/// Object key for the record with `identifier`
///
/// Both the presigned URL and the public URL go through this function so the
/// uploaded object always lands under the record's identifier.
#[must_use]
pub fn object_key_for(identifier: &str) -> String {
    identifier.to_string()
}

/// Result of issuing an upload link
#[derive(Debug, Clone)]
pub struct IssuedUploadLink<R> {
    /// Record stored under the identifier at call time, if any
    pub record: Option<R>,
    /// URL the object is readable from after a successful upload
    pub public_url: String,
    /// Presigned PUT URL for the upload
    pub signed_url: PresignedUrl,
}

/// Issuer of attachment upload links for todo items
pub type TodoUploadLinks = UploadLinkIssuer<TodoItem>;

/// Issues presigned upload URLs keyed by record identifier
pub struct UploadLinkIssuer<R: Send> {
    presigner: Arc<dyn Presigner>,
    record_store: Arc<dyn RecordStore<Record = R>>,
    config: UploadLinkConfig,
}

impl<R: Send> UploadLinkIssuer<R> {
    /// Creates a new issuer
    ///
    /// # Arguments
    ///
    /// * `presigner` - Signs object storage requests
    /// * `record_store` - Looks up the record an upload belongs to
    /// * `config` - Bucket and expiry of the issued links
    #[must_use]
    pub fn new(
        presigner: Arc<dyn Presigner>,
        record_store: Arc<dyn RecordStore<Record = R>>,
        config: UploadLinkConfig,
    ) -> Self {
        Self {
            presigner,
            record_store,
            config,
        }
    }

    /// Config the issuer was built with
    #[must_use]
    pub const fn config(&self) -> &UploadLinkConfig {
        &self.config
    }

    /// Issues a presigned upload URL for `identifier` and looks up its record
    ///
    /// The signing request and the record lookup run concurrently. A missing
    /// record is not an error: the link is still issued with `record: None`.
    ///
    /// # Errors
    ///
    /// Returns `UploadLinkError::InvalidIdentifier` if `identifier` is empty
    /// Returns `UploadLinkError::StorageSigning` if the URL cannot be signed
    /// Returns `UploadLinkError::RecordStoreUnavailable` if the lookup fails
    ///
    /// When both collaborators fail the signing error is returned.
    #[instrument(skip(self), fields(bucket = %self.config.bucket_name))]
    pub async fn issue_upload_link(
        &self,
        identifier: &str,
        content_type: &str,
    ) -> UploadLinkResult<IssuedUploadLink<R>> {
        if identifier.is_empty() {
            return Err(UploadLinkError::InvalidIdentifier);
        }

        let key = object_key_for(identifier);
        let request = self.upload_request(&key, content_type);

        let (signed_url, record) = tokio::join!(
            self.presigner.presign(&request),
            self.record_store.get_by_identifier(identifier),
        );
        let signed_url = signed_url?;
        let record = record?;

        info!(
            record_found = record.is_some(),
            expires_at = %signed_url.expires_at,
            "Issued upload link"
        );

        Ok(IssuedUploadLink {
            record,
            public_url: self.config.public_object_url(&key),
            signed_url,
        })
    }

    fn upload_request(&self, key: &str, content_type: &str) -> PresignRequest {
        PresignRequest {
            operation: PresignOperation::PutObject,
            bucket: self.config.bucket_name.clone(),
            key: key.to_string(),
            expires_in: self.config.expiry,
            content_type: content_type.to_string(),
            acl: ObjectAcl::PublicRead,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::object_storage::BucketError;
    use crate::testing::{InMemoryRecordStore, StaticPresigner};
    use pretty_assertions::assert_eq;

    const BUCKET: &str = "todo-attachments";

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Note {
        id: String,
        title: String,
    }

    fn note(id: &str, title: &str) -> Note {
        Note {
            id: id.to_string(),
            title: title.to_string(),
        }
    }

    /// Sets its flag when dropped
    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    /// Record store whose lookups never complete
    #[derive(Default)]
    struct PendingRecordStore {
        started: Arc<AtomicBool>,
        dropped: Arc<AtomicBool>,
    }

    #[async_trait::async_trait]
    impl RecordStore for PendingRecordStore {
        type Record = Note;

        async fn get_by_identifier(
            &self,
            _identifier: &str,
        ) -> Result<Option<Note>, RecordStoreError> {
            let _guard = DropFlag(self.dropped.clone());
            self.started.store(true, Ordering::SeqCst);
            std::future::pending().await
        }
    }

    fn issuer(
        presigner: Arc<StaticPresigner>,
        store: InMemoryRecordStore<Note>,
    ) -> UploadLinkIssuer<Note> {
        UploadLinkIssuer::new(presigner, Arc::new(store), UploadLinkConfig::new(BUCKET))
    }

    #[tokio::test]
    async fn test_issue_upload_link_with_existing_record() {
        let presigner = Arc::new(StaticPresigner::default());
        let store = InMemoryRecordStore::default().with_record("abc123", note("abc123", "x"));

        let link = issuer(presigner.clone(), store)
            .issue_upload_link("abc123", "image/png")
            .await
            .unwrap();

        assert_eq!(link.record, Some(note("abc123", "x")));
        assert_eq!(
            link.public_url,
            "https://todo-attachments.s3.amazonaws.com/abc123"
        );
        assert!(link.signed_url.url.contains("/todo-attachments/abc123?"));
        assert!(link.signed_url.url.contains("content-type=image/png"));
        assert!(link.signed_url.url.contains("expires=3600"));
        assert!(link.signed_url.url.contains("acl=public-read"));
    }

    #[tokio::test]
    async fn test_issue_upload_link_sends_fixed_presign_parameters() {
        let presigner = Arc::new(StaticPresigner::default());

        issuer(presigner.clone(), InMemoryRecordStore::default())
            .issue_upload_link("abc123", "image/png")
            .await
            .unwrap();

        assert_eq!(
            presigner.requests(),
            vec![PresignRequest {
                operation: PresignOperation::PutObject,
                bucket: BUCKET.to_string(),
                key: "abc123".to_string(),
                expires_in: Duration::from_secs(3600),
                content_type: "image/png".to_string(),
                acl: ObjectAcl::PublicRead,
            }]
        );
    }

    #[tokio::test]
    async fn test_issue_upload_link_without_record() {
        let presigner = Arc::new(StaticPresigner::default());

        let link = issuer(presigner, InMemoryRecordStore::default())
            .issue_upload_link("missing-id", "text/plain")
            .await
            .unwrap();

        assert_eq!(link.record, None);
        assert_eq!(
            link.public_url,
            "https://todo-attachments.s3.amazonaws.com/missing-id"
        );
        assert!(link.signed_url.url.contains("/missing-id?"));
        assert!(link.signed_url.url.contains("content-type=text/plain"));
    }

    #[tokio::test]
    async fn test_issue_upload_link_keys_match_identifier() {
        let presigner = Arc::new(StaticPresigner::default());
        let issuer = issuer(presigner.clone(), InMemoryRecordStore::default());

        for identifier in ["a", "todo-42", "7f9c1b2e-3d4a-4c5b-8e6f-0a1b2c3d4e5f", "nested/key.png"] {
            let link = issuer
                .issue_upload_link(identifier, "application/pdf")
                .await
                .unwrap();

            assert_eq!(
                link.public_url,
                format!("{}/{identifier}", issuer.config().public_endpoint())
            );
        }

        let keys: Vec<String> = presigner.requests().into_iter().map(|r| r.key).collect();
        assert_eq!(
            keys,
            vec![
                "a",
                "todo-42",
                "7f9c1b2e-3d4a-4c5b-8e6f-0a1b2c3d4e5f",
                "nested/key.png"
            ]
        );
    }

    #[tokio::test]
    async fn test_repeated_calls_keep_their_own_content_type() {
        let presigner = Arc::new(StaticPresigner::default());
        let issuer = issuer(presigner.clone(), InMemoryRecordStore::default());

        let png = issuer.issue_upload_link("abc123", "image/png").await.unwrap();
        let pdf = issuer
            .issue_upload_link("abc123", "application/pdf")
            .await
            .unwrap();

        assert!(png.signed_url.url.contains("content-type=image/png"));
        assert!(pdf.signed_url.url.contains("content-type=application/pdf"));
        assert_eq!(png.public_url, pdf.public_url);

        let requests = presigner.requests();
        assert_eq!(requests[0].key, requests[1].key);
        assert_eq!(requests[0].content_type, "image/png");
        assert_eq!(requests[1].content_type, "application/pdf");
    }

    #[tokio::test]
    async fn test_empty_identifier_is_rejected_before_signing() {
        let presigner = Arc::new(StaticPresigner::default());

        let err = issuer(presigner.clone(), InMemoryRecordStore::default())
            .issue_upload_link("", "image/png")
            .await
            .unwrap_err();

        assert!(matches!(err, UploadLinkError::InvalidIdentifier));
        assert!(presigner.requests().is_empty());
    }

    #[tokio::test]
    async fn test_signing_failure_propagates() {
        let presigner = Arc::new(StaticPresigner::failing("malformed key"));
        let store = InMemoryRecordStore::default().with_record("abc123", note("abc123", "x"));

        let err = issuer(presigner, store)
            .issue_upload_link("abc123", "image/png")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            UploadLinkError::StorageSigning(BucketError::S3Error(msg)) if msg == "malformed key"
        ));
    }

    #[tokio::test]
    async fn test_record_store_failure_propagates() {
        let presigner = Arc::new(StaticPresigner::default());

        let err = issuer(presigner, InMemoryRecordStore::unavailable())
            .issue_upload_link("abc123", "image/png")
            .await
            .unwrap_err();

        assert!(matches!(err, UploadLinkError::RecordStoreUnavailable(_)));
    }

    #[tokio::test]
    async fn test_signing_error_wins_when_both_collaborators_fail() {
        let presigner = Arc::new(StaticPresigner::failing("bad credentials"));

        let err = issuer(presigner, InMemoryRecordStore::unavailable())
            .issue_upload_link("abc123", "image/png")
            .await
            .unwrap_err();

        assert!(matches!(err, UploadLinkError::StorageSigning(_)));
    }

    #[test]
    fn test_config_defaults_to_one_hour_expiry() {
        let config = UploadLinkConfig::new(BUCKET);

        assert_eq!(config.expiry, Duration::from_secs(3600));
        assert_eq!(
            config.public_endpoint(),
            "https://todo-attachments.s3.amazonaws.com"
        );
    }

    #[tokio::test]
    async fn test_abandoned_call_signs_concurrently_and_drops_lookup() {
        let presigner = Arc::new(StaticPresigner::default());
        let store = Arc::new(PendingRecordStore::default());
        let links = UploadLinkIssuer::new(
            presigner.clone(),
            store.clone(),
            UploadLinkConfig::new(BUCKET),
        );

        let result = tokio::time::timeout(
            Duration::from_millis(50),
            links.issue_upload_link("abc123", "image/png"),
        )
        .await;

        assert!(result.is_err(), "call should not complete while the lookup is pending");
        assert!(store.started.load(Ordering::SeqCst));
        assert_eq!(presigner.requests().len(), 1);
        assert!(store.dropped.load(Ordering::SeqCst));
    }
}
