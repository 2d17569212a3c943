/// Todo attachment upload URLs
pub mod attachments;

use aide::axum::{routing::post, ApiRouter};

/// Creates the v1 API router with all v1 handler routes
pub fn handler() -> ApiRouter {
    ApiRouter::new().api_route(
        "/todos/{todo_id}/attachment-url",
        post(attachments::create_attachment_url),
    )
}
