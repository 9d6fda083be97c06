//! Wraps teloxide::Bot and implements [`dclock_core::Bot`]. Production code sends messages via Telegram; tests can substitute another Bot impl.

use anyhow::{Context, Result};
use async_trait::async_trait;
use dclock_core::{Bot as CoreBot, Chat, DclockError, ReplyKeyboard};
use teloxide::{
    prelude::*,
    types::{ChatId, KeyboardButton, KeyboardMarkup, ReplyMarkup},
};

/// Thin wrapper around teloxide::Bot that implements dclock-core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Builds a teloxide Bot for `token`, pointed at `api_url` when given (e.g. a local Bot API server or a test mock).
    pub fn build_bot(token: &str, api_url: Option<&str>) -> Result<teloxide::Bot> {
        let bot = teloxide::Bot::new(token);
        match api_url {
            Some(url_str) => {
                let url = reqwest::Url::parse(url_str)
                    .with_context(|| format!("Invalid Telegram API URL: {}", url_str))?;
                Ok(bot.set_api_url(url))
            }
            None => Ok(bot),
        }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

/// Resized reply keyboard with one button per label.
pub fn to_keyboard_markup(keyboard: &ReplyKeyboard) -> KeyboardMarkup {
    KeyboardMarkup::new(
        keyboard
            .rows
            .iter()
            .map(|row| row.iter().map(|label| KeyboardButton::new(label.clone()))),
    )
    .resize_keyboard()
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> dclock_core::Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| DclockError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_message_with_keyboard(
        &self,
        chat: &Chat,
        text: &str,
        keyboard: &ReplyKeyboard,
    ) -> dclock_core::Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .reply_markup(ReplyMarkup::Keyboard(to_keyboard_markup(keyboard)))
            .await
            .map_err(|e| DclockError::Bot(e.to_string()))?;
        Ok(())
    }
}
