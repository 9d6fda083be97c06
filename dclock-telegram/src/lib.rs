//! # dclock-telegram
//!
//! Telegram transport layer: adapters, [`dclock_core::Bot`] implementation, minimal config, REPL runner.
//! Handles only Telegram connectivity; no persistence or dialog logic.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{to_keyboard_markup, TelegramBotAdapter};
pub use config::TelegramConfig;
pub use runner::run_repl;
