//! Storage crate: per-user dialog state persistence.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – UserDialogState, UserStats
//! - [`repository`] – UserStore trait
//! - [`user_repo`] – SqliteUserRepository (SQLite)
//! - [`memory_repo`] – InMemoryUserRepository
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod memory_repo;
mod models;
mod repository;
mod sqlite_pool;
mod user_repo;


pub use error::StorageError;
pub use memory_repo::InMemoryUserRepository;
pub use models::{UserDialogState, UserStats};
pub use repository::UserStore;
pub use sqlite_pool::SqlitePoolManager;
pub use user_repo::SqliteUserRepository;
