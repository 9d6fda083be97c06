//! Dialog errors. Every failure of [`DialogController::process`](crate::DialogController::process) is one of these.

use dclock_core::{DclockError, HandlerError};
use storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DialogError {
    /// Username absent on read. Entry creates missing users, so this only surfaces if the row vanishes mid-call.
    #[error("User not found: {0}")]
    NotFound(String),

    /// Numeric or date text that passed classification but not parsing. Dialog not advanced.
    #[error("Parse error: {0}")]
    Parse(String),

    /// An answer arrived before the data it depends on. Dialog not advanced.
    #[error("Missing prerequisite: {0}")]
    MissingPrerequisite(String),

    /// Persistence failed; nothing was sent for this message.
    #[error("Store error: {0}")]
    Store(StorageError),

    /// Sending failed after state was persisted.
    #[error("Transport error: {0}")]
    Transport(DclockError),
}

impl DialogError {
    /// Rejected input rather than an I/O failure.
    pub fn is_rejection(&self) -> bool {
        matches!(self, DialogError::Parse(_) | DialogError::MissingPrerequisite(_))
    }
}

impl From<StorageError> for DialogError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(username) => DialogError::NotFound(username),
            other => DialogError::Store(other),
        }
    }
}

impl From<DialogError> for DclockError {
    fn from(err: DialogError) -> Self {
        match err {
            DialogError::Parse(detail) => HandlerError::InvalidInput(detail).into(),
            DialogError::MissingPrerequisite(detail) => HandlerError::State(detail).into(),
            DialogError::NotFound(username) => {
                DclockError::Database(format!("user not found: {username}"))
            }
            DialogError::Store(e) => DclockError::Database(e.to_string()),
            DialogError::Transport(e) => e,
        }
    }
}

pub type Result<T> = std::result::Result<T, DialogError>;
