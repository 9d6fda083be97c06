//! Core types: user, chat, message, reply keyboard, and the Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// Key used to look up per-user dialog state: the username, or the numeric id when the account has none.
    pub fn dialog_key(&self) -> String {
        match self.username.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.id.to_string(),
        }
    }
}

/// Chat (channel or private) identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// A single inbound text message with sender and chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Rows of quick-reply labels shown under the input field. Rendering is up to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyKeyboard {
    pub rows: Vec<Vec<String>>,
}

impl ReplyKeyboard {
    pub fn new<R, L>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// All labels, row by row.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(String::as_str)
    }
}

/// What a handler did with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// The message was processed (state may have changed, replies may have been sent).
    Handled,
    /// The message was not for this handler (e.g. no text).
    Ignored,
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Processes one inbound message. The runner calls it once per message, in arrival order per chat.
///
/// Implementations log their own failures; the runner does not log a returned error again.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, message: &Message) -> crate::error::Result<HandlerResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, username: Option<&str>) -> User {
        User {
            id,
            username: username.map(str::to_string),
            first_name: None,
            last_name: None,
        }
    }

    #[test]
    fn test_dialog_key_prefers_username() {
        assert_eq!(user(7, Some("alice")).dialog_key(), "alice");
    }

    #[test]
    fn test_dialog_key_falls_back_to_id() {
        assert_eq!(user(42, None).dialog_key(), "42");
        assert_eq!(user(42, Some("")).dialog_key(), "42");
    }

    #[test]
    fn test_reply_keyboard_labels() {
        let kb = ReplyKeyboard::new([["60", "70"], ["80", "90"]]);
        assert_eq!(kb.rows.len(), 2);
        assert_eq!(kb.labels().collect::<Vec<_>>(), vec!["60", "70", "80", "90"]);
    }
}
