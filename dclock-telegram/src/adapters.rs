//! Adapters from Telegram (teloxide) types to dclock_core types.
//! Depends only on teloxide and dclock_core type definitions.

use dclock_core::{Chat, Message, ToCoreMessage, ToCoreUser, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`].
///
/// Messages without a sender (channel posts) are attributed to the chat itself, so the chat id becomes the dialog key.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User {
                    id: self.0.chat.id.0,
                    username: self.0.chat.username().map(str::to_string),
                    first_name: None,
                    last_name: None,
                }),
            chat: Chat {
                id: self.0.chat.id.0,
                chat_type: chat_type(&self.0.chat),
            },
            content: self.0.text().unwrap_or("").to_string(),
            created_at: self.0.date,
        }
    }
}

fn chat_type(chat: &teloxide::types::Chat) -> String {
    if chat.is_private() {
        "private"
    } else if chat.is_group() {
        "group"
    } else if chat.is_supergroup() {
        "supergroup"
    } else if chat.is_channel() {
        "channel"
    } else {
        "unknown"
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Test: TelegramUserWrapper converts teloxide User to core User with correct id, username, first_name, last_name.**
    #[test]
    fn test_telegram_user_wrapper_to_core() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(123),
            is_bot: false,
            first_name: "Alice".to_string(),
            last_name: Some("Liddell".to_string()),
            username: Some("alice".to_string()),
            language_code: Some("en".to_string()),
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let core_user = TelegramUserWrapper(&user).to_core();

        assert_eq!(core_user.id, 123);
        assert_eq!(core_user.username, Some("alice".to_string()));
        assert_eq!(core_user.first_name, Some("Alice".to_string()));
        assert_eq!(core_user.last_name, Some("Liddell".to_string()));
        assert_eq!(core_user.dialog_key(), "alice");
    }

    /// **Test: A user without username is keyed by id.**
    #[test]
    fn test_telegram_user_without_username() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(987),
            is_bot: false,
            first_name: "Bob".to_string(),
            last_name: None,
            username: None,
            language_code: None,
            is_premium: false,
            added_to_attachment_menu: false,
        };

        assert_eq!(TelegramUserWrapper(&user).to_core().dialog_key(), "987");
    }
}
