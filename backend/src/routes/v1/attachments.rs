use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::Path, Extension, Json};
use axum_valid::Valid;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use todo_storage::todo::TodoItem;
use tracing::instrument;
use validator::Validate;

use crate::{types::AppError, upload_link::TodoUploadLinks};

/// Request for an attachment upload URL
#[derive(Debug, Deserialize, Serialize, JsonSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct AttachmentUrlRequest {
    /// MIME type the attachment will be uploaded with
    #[validate(length(min = 1))]
    pub content_type: String,
}

/// Upload URL for a todo attachment, with the todo it belongs to
#[derive(Debug, Serialize, JsonSchema)]
pub struct AttachmentUrlResponse {
    /// The todo the attachment belongs to, `null` if it does not exist yet
    pub item: Option<TodoItem>,
    /// Public URL of the attachment once uploaded
    pub attachment_url: String,
    /// Presigned URL to PUT the attachment to
    pub upload_url: String,
    /// Headers that must accompany the PUT request
    pub upload_headers: BTreeMap<String, String>,
    /// ISO-8601 UTC timestamp when the upload URL expires
    pub expires_at: String,
}

/// Creates a presigned URL for uploading a todo attachment
///
/// The object is stored under the todo ID, so the returned `attachment_url`
/// always points at the object uploaded through `upload_url`. The URL is issued
/// whether or not the todo exists yet.
///
/// # Errors
///
/// - `400 BAD_REQUEST` - Empty todo ID or content type
/// - `500 INTERNAL_SERVER_ERROR` - The upload URL could not be signed
/// - `503 SERVICE_UNAVAILABLE` - Todo storage lookup failed
#[instrument(skip(upload_links, payload))]
pub async fn create_attachment_url(
    Extension(upload_links): Extension<Arc<TodoUploadLinks>>,
    Path(todo_id): Path<String>,
    Valid(Json(payload)): Valid<Json<AttachmentUrlRequest>>,
) -> Result<Json<AttachmentUrlResponse>, AppError> {
    let link = upload_links
        .issue_upload_link(&todo_id, &payload.content_type)
        .await?;

    Ok(Json(AttachmentUrlResponse {
        item: link.record,
        attachment_url: link.public_url,
        upload_url: link.signed_url.url,
        upload_headers: link.signed_url.headers.into_iter().collect(),
        expires_at: link.signed_url.expires_at.to_rfc3339(),
    }))
}
