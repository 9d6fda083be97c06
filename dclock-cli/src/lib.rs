//! # dclock-cli
//!
//! Command line for the death-clock bot: argument parsing, config loading and process wiring.

pub mod cli;
pub mod config;
pub mod runner;

pub use cli::{Cli, Commands};
pub use config::BotConfig;
pub use runner::{build_store, init_db, load_stats, run_bot};
