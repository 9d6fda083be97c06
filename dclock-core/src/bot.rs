//! Bot abstraction for sending messages.
//!
//! [`Bot`] is transport-agnostic; dclock-telegram implements it via teloxide and tests substitute a recording mock.

use crate::error::Result;
use crate::types::{Chat, ReplyKeyboard};
use async_trait::async_trait;

/// Abstraction for sending messages. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a plain text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a text message with a reply keyboard of quick-reply labels.
    async fn send_message_with_keyboard(
        &self,
        chat: &Chat,
        text: &str,
        keyboard: &ReplyKeyboard,
    ) -> Result<()>;
}
