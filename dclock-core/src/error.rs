//! Error types for the bot core.
//!
//! [`DclockError`] is the top-level error; [`HandlerError`] is used for handler failures.

use thiserror::Error;

/// Top-level error surfaced to the runner: database, bot transport or handler.
#[derive(Error, Debug)]
pub enum DclockError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),
}

/// Errors produced by handlers when a message cannot advance the dialog.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("State error: {0}")]
    State(String),
}

/// Result type for core operations; uses [`DclockError`].
pub type Result<T> = std::result::Result<T, DclockError>;
