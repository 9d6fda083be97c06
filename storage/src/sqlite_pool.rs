//! SQLite connection pool wrapper for the storage crate.

use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;

/// Manages a single SQLite pool; creates the DB file (and its directory) if missing.
#[derive(Clone)]
pub struct SqlitePoolManager {
    pool: SqlitePool,
}

impl SqlitePoolManager {
    /// Creates a pool for the given database URL.
    ///
    /// Accepts `sqlite:` URLs (including `sqlite::memory:`), `file:` prefixed paths and plain paths.
    /// In-memory databases get a single connection that is never recycled, since each connection
    /// would otherwise see its own empty database.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        info!("Initializing SQLite pool: {}", database_url);

        let in_memory = database_url.contains(":memory:");

        let options = if database_url.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(database_url)?.create_if_missing(true)
        } else {
            let path = database_url.strip_prefix("file:").unwrap_or(database_url);
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
        };

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;

        Ok(Self { pool })
    }

    /// Returns the underlying pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
