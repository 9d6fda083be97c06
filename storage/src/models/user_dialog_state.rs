//! Per-user dialog record.
//!
//! Maps to the `users` table. One row per username; rows are never deleted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which question is pending for a user and the answers collected so far.
///
/// At most one of `awaiting_lifespan` / `awaiting_birthday` is set. `birth_date` is only
/// stored once `expected_lifespan_years` is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserDialogState {
    pub username: String,
    pub awaiting_lifespan: bool,
    pub awaiting_birthday: bool,
    pub expected_lifespan_years: Option<u32>,
    pub birth_date: Option<NaiveDate>,
}

impl UserDialogState {
    /// Fresh record: no pending question, no answers.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            awaiting_lifespan: false,
            awaiting_birthday: false,
            expected_lifespan_years: None,
            birth_date: None,
        }
    }

    /// Both answers are present.
    pub fn has_answers(&self) -> bool {
        self.expected_lifespan_years.is_some() && self.birth_date.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let state = UserDialogState::new("alice");
        assert_eq!(state.username, "alice");
        assert!(!state.awaiting_lifespan);
        assert!(!state.awaiting_birthday);
        assert!(state.expected_lifespan_years.is_none());
        assert!(state.birth_date.is_none());
        assert!(!state.has_answers());
    }
}
