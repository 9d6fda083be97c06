//! # dclock-dialog
//!
//! The death-clock dialog engine: classifies each incoming text, advances the per-user dialog
//! (lifespan, then birth date), persists the new state and replies with the remaining-time report.
//!
//! ## Modules
//!
//! - [`date_math`] – calendar differences, death date, remaining-time breakdown
//! - [`input`] – text classification and parsing
//! - [`commands`] – command labels and reply keyboards
//! - [`machine`] – pure transition function
//! - [`controller`] – [`DialogController`], the per-message entry point

pub mod clock;
pub mod commands;
pub mod controller;
pub mod date_math;
pub mod error;
pub mod input;
pub mod locks;
pub mod machine;
pub mod messages;

pub use clock::{Clock, FixedClock, SystemClock};
pub use commands::Command;
pub use controller::DialogController;
pub use date_math::{calendar_diff, death_date, format_date, remaining_breakdown, RemainingTime};
pub use error::{DialogError, Result};
pub use input::{classify, Input};
pub use machine::{transition, DialogState, Reply, Transition};
