use crate::error::StorageError;
use crate::models::UserDialogState;
use async_trait::async_trait;

/// Persistence for per-user dialog state, keyed by username.
///
/// `create` is idempotent. `read` fails with [`StorageError::NotFound`] for unknown users.
/// `write` is an upsert.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn exists(&self, username: &str) -> Result<bool, StorageError>;
    async fn create(&self, username: &str) -> Result<(), StorageError>;
    async fn read(&self, username: &str) -> Result<UserDialogState, StorageError>;
    async fn write(&self, state: &UserDialogState) -> Result<(), StorageError>;
}
