mod user_dialog_state;
mod user_stats;

pub use user_dialog_state::UserDialogState;
pub use user_stats::UserStats;
