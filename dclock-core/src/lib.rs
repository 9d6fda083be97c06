//! # dclock-core
//!
//! Core types and traits for the death-clock bot: [`Bot`], [`Handler`], message, user and keyboard types,
//! and tracing initialization. Transport-agnostic; used by dclock-dialog and dclock-telegram.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{DclockError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, Handler, HandlerResponse, Message, ReplyKeyboard, ToCoreMessage, ToCoreUser, User,
};
