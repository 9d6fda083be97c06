//! Aggregate statistics for dialog records.
//!
//! Returned by SqliteUserRepository::get_stats.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_users: i64,
    /// Users with both lifespan and birth date stored.
    pub completed_users: i64,
    pub awaiting_lifespan: i64,
    pub awaiting_birthday: i64,
}
