//! Todo item storage module for `DynamoDB` operations

mod error;

use std::sync::Arc;

use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoDbClient;
pub use error::{TodoStorageError, TodoStorageResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{debug, instrument};

/// `DynamoDB` item for a single todo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TodoItem {
    /// Primary key - unique todo ID
    pub todo_id: String,
    /// Owner of the todo
    pub user_id: String,
    /// Display name
    pub name: String,
    /// Due date as entered by the user
    pub due_date: String,
    /// Whether the todo has been completed
    pub done: bool,
    /// Timestamp of todo creation
    pub created_at: i64,
    /// Public URL of the uploaded attachment, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

/// `DynamoDB` attribute names for the todos table
#[derive(Debug, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TodoAttribute {
    /// Primary key - unique todo ID
    TodoId,
    /// Owner of the todo
    UserId,
    /// Display name
    Name,
    /// Due date
    DueDate,
    /// Completion flag
    Done,
    /// Creation timestamp
    CreatedAt,
    /// Public attachment URL
    AttachmentUrl,
}

/// Storage client for todo item lookups
pub struct TodoStorage {
    dynamodb_client: Arc<DynamoDbClient>,
    table_name: String,
}

impl TodoStorage {
    /// Creates a new storage instance
    ///
    /// # Arguments
    ///
    /// * `dynamodb_client` - Pre-configured `DynamoDB` client
    /// * `table_name` - `DynamoDB` table name for todo items
    #[must_use]
    pub const fn new(dynamodb_client: Arc<DynamoDbClient>, table_name: String) -> Self {
        Self {
            dynamodb_client,
            table_name,
        }
    }

    /// Get a single todo item by ID
    ///
    /// Returns `Ok(None)` when no item is stored under `todo_id`.
    ///
    /// # Errors
    ///
    /// Returns `TodoStorageError` if the `DynamoDB` get operation fails or the
    /// stored item cannot be deserialized
    #[instrument(skip(self))]
    pub async fn get_one(&self, todo_id: &str) -> TodoStorageResult<Option<TodoItem>> {
        let response = self
            .dynamodb_client
            .get_item()
            .table_name(&self.table_name)
            .key(
                TodoAttribute::TodoId.to_string(),
                AttributeValue::S(todo_id.to_string()),
            )
            .send()
            .await?;

        let item: Option<TodoItem> = response.item.map(serde_dynamo::from_item).transpose()?;

        debug!(found = item.is_some(), "Looked up todo item");

        Ok(item)
    }
}
