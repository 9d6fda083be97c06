//! In-memory [`UserStore`] for tests and ephemeral runs (`DATABASE_URL=memory`).

use crate::error::StorageError;
use crate::models::UserDialogState;
use crate::repository::UserStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    inner: Arc<RwLock<HashMap<String, UserDialogState>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserRepository {
    async fn exists(&self, username: &str) -> Result<bool, StorageError> {
        Ok(self.inner.read().await.contains_key(username))
    }

    async fn create(&self, username: &str) -> Result<(), StorageError> {
        self.inner
            .write()
            .await
            .entry(username.to_string())
            .or_insert_with(|| UserDialogState::new(username));
        Ok(())
    }

    async fn read(&self, username: &str) -> Result<UserDialogState, StorageError> {
        self.inner
            .read()
            .await
            .get(username)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(username.to_string()))
    }

    async fn write(&self, state: &UserDialogState) -> Result<(), StorageError> {
        self.inner
            .write()
            .await
            .insert(state.username.clone(), state.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_create_is_idempotent() {
        let repo = InMemoryUserRepository::new();
        repo.create("alice").await.unwrap();

        let mut state = repo.read("alice").await.unwrap();
        state.expected_lifespan_years = Some(70);
        repo.write(&state).await.unwrap();

        repo.create("alice").await.unwrap();
        assert_eq!(repo.read("alice").await.unwrap().expected_lifespan_years, Some(70));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let repo = InMemoryUserRepository::new();
        assert!(matches!(
            repo.read("ghost").await,
            Err(StorageError::NotFound(name)) if name == "ghost"
        ));
        assert!(!repo.exists("ghost").await.unwrap());
    }

    #[tokio::test]
    async fn test_write_upserts() {
        let repo = InMemoryUserRepository::new();
        let mut state = UserDialogState::new("bob");
        state.expected_lifespan_years = Some(80);
        state.birth_date = NaiveDate::from_ymd_opt(1990, 1, 1);
        repo.write(&state).await.unwrap();

        assert!(repo.exists("bob").await.unwrap());
        assert_eq!(repo.read("bob").await.unwrap(), state);
    }
}
