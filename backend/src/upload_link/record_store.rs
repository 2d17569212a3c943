use async_trait::async_trait;
use todo_storage::todo::{TodoItem, TodoStorage};

use super::RecordStoreError;

/// Read-only lookup of persisted records by identifier
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Record type returned by the store
    type Record: Send;

    /// Returns the record stored under `identifier`, or `None` if there is none
    ///
    /// # Errors
    ///
    /// Returns `RecordStoreError` if the backing store cannot be reached
    async fn get_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<Self::Record>, RecordStoreError>;
}

#[async_trait]
impl RecordStore for TodoStorage {
    type Record = TodoItem;

    async fn get_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<TodoItem>, RecordStoreError> {
        Ok(self.get_one(identifier).await?)
    }
}
