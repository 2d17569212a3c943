use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Extension, Router};
use todo_backend::{
    routes,
    testing::{InMemoryRecordStore, StaticPresigner},
    types::Environment,
    upload_link::{TodoUploadLinks, UploadLinkConfig},
};
use todo_storage::todo::TodoItem;
use tower::ServiceExt;

pub const TEST_BUCKET: &str = "todo-attachments-test";

/// Setup tracing for tests
pub fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Router wired to in-memory collaborators
pub struct TestContext {
    pub router: Router,
    pub presigner: Arc<StaticPresigner>,
}

impl TestContext {
    /// Context whose todo store holds `todos`
    pub fn new(todos: Vec<TodoItem>) -> Self {
        let store = todos
            .into_iter()
            .fold(InMemoryRecordStore::default(), |store, todo| {
                let todo_id = todo.todo_id.clone();
                store.with_record(&todo_id, todo)
            });

        Self::with_collaborators(Arc::new(StaticPresigner::default()), store)
    }

    /// Context with explicit collaborators
    pub fn with_collaborators(
        presigner: Arc<StaticPresigner>,
        store: InMemoryRecordStore<TodoItem>,
    ) -> Self {
        setup_test_env();

        let upload_links = Arc::new(TodoUploadLinks::new(
            presigner.clone(),
            Arc::new(store),
            UploadLinkConfig::new(TEST_BUCKET),
        ));

        let router = routes::handler()
            .layer(Extension(Environment::Development))
            .layer(Extension(upload_links))
            .into();

        Self { router, presigner }
    }

    pub async fn send_post_request(
        &self,
        route: &str,
        payload: serde_json::Value,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string()))?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }
}
