//! User repository: persistence of per-user dialog state in SQLite.
//!
//! Uses SqlitePoolManager and the UserDialogState / UserStats models.
//! Implements [`UserStore`]; callers go through exists/create/read/write.

use crate::error::StorageError;
use crate::models::{UserDialogState, UserStats};
use crate::repository::UserStore;
use crate::sqlite_pool::SqlitePoolManager;
use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct SqliteUserRepository {
    pool_manager: SqlitePoolManager,
}

impl SqliteUserRepository {
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating users table if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                username TEXT PRIMARY KEY,
                awaiting_lifespan BOOLEAN NOT NULL DEFAULT 0,
                awaiting_birthday BOOLEAN NOT NULL DEFAULT 0,
                expected_lifespan_years INTEGER DEFAULT NULL,
                birth_date TEXT DEFAULT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        info!("Users table ready");
        Ok(())
    }

    pub async fn get_stats(&self) -> Result<UserStats, StorageError> {
        let pool = self.pool_manager.pool();

        let total_users: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        let completed_users: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM users WHERE expected_lifespan_years IS NOT NULL AND birth_date IS NOT NULL",
        )
        .fetch_one(pool)
        .await?;

        let awaiting_lifespan: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM users WHERE awaiting_lifespan = 1")
                .fetch_one(pool)
                .await?;

        let awaiting_birthday: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM users WHERE awaiting_birthday = 1")
                .fetch_one(pool)
                .await?;

        Ok(UserStats {
            total_users: total_users.0,
            completed_users: completed_users.0,
            awaiting_lifespan: awaiting_lifespan.0,
            awaiting_birthday: awaiting_birthday.0,
        })
    }
}

#[async_trait]
impl UserStore for SqliteUserRepository {
    async fn exists(&self, username: &str) -> Result<bool, StorageError> {
        let pool = self.pool_manager.pool();

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(pool)
            .await?;

        Ok(count.0 > 0)
    }

    async fn create(&self, username: &str) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO users (username, awaiting_lifespan, awaiting_birthday, updated_at)
            VALUES (?, 0, 0, ?)
            "#,
        )
        .bind(username)
        .bind(Utc::now())
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            info!(username = %username, "Created user");
        }
        Ok(())
    }

    async fn read(&self, username: &str) -> Result<UserDialogState, StorageError> {
        let pool = self.pool_manager.pool();

        sqlx::query_as::<_, UserDialogState>(
            r#"
            SELECT username, awaiting_lifespan, awaiting_birthday, expected_lifespan_years, birth_date
            FROM users WHERE username = ? LIMIT 1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StorageError::NotFound(username.to_string()))
    }

    async fn write(&self, state: &UserDialogState) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            INSERT INTO users (username, awaiting_lifespan, awaiting_birthday, expected_lifespan_years, birth_date, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(username) DO UPDATE SET
                awaiting_lifespan = excluded.awaiting_lifespan,
                awaiting_birthday = excluded.awaiting_birthday,
                expected_lifespan_years = excluded.expected_lifespan_years,
                birth_date = excluded.birth_date,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&state.username)
        .bind(state.awaiting_lifespan)
        .bind(state.awaiting_birthday)
        .bind(state.expected_lifespan_years)
        .bind(state.birth_date)
        .bind(Utc::now())
        .execute(pool)
        .await?;

        debug!(
            username = %state.username,
            awaiting_lifespan = state.awaiting_lifespan,
            awaiting_birthday = state.awaiting_birthday,
            "Saved user state"
        );
        Ok(())
    }
}
