use axum::response::Response;
use http_body_util::BodyExt;
use todo_storage::todo::TodoItem;

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Todo item with fixed values for `todo_id`
pub fn create_test_todo(todo_id: &str) -> TodoItem {
    TodoItem {
        todo_id: todo_id.to_string(),
        user_id: "user-1".to_string(),
        name: "x".to_string(),
        due_date: "2026-11-01".to_string(),
        done: false,
        created_at: 1_760_000_000,
        attachment_url: None,
    }
}

/// Route issuing an attachment URL for `todo_id`
pub fn attachment_url_route(todo_id: &str) -> String {
    format!("/v1/todos/{todo_id}/attachment-url")
}
