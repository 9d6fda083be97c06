//! REPL loop: converts each teloxide message into a core [`Message`](dclock_core::Message) and hands it to the handler.
//! Calls the teloxide REPL and `get_me` once at startup for logging.

use anyhow::Result;
use dclock_core::{Handler, HandlerResponse, Message, ToCoreMessage};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, error, info, instrument};

use super::adapters::TelegramMessageWrapper;

/// Starts long polling with the given bot and handler. Returns when the REPL stops (e.g. on Ctrl+C).
///
/// The handler is awaited inside the update callback. teloxide runs updates of one chat
/// sequentially, so a user's messages are handled in arrival order.
#[instrument(skip(bot, handler))]
pub async fn run_repl(bot: teloxide::Bot, handler: Arc<dyn Handler>) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => info!(
            username = me.user.username.as_deref().unwrap_or(""),
            "Bot identity confirmed, starting repl"
        ),
        Err(e) => error!(error = %e, "get_me failed, starting repl anyway"),
    }

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let handler = handler.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();

            match msg.text() {
                Some(text) => info!(
                    user_id = core_msg.user.id,
                    chat_id = core_msg.chat.id,
                    message_content = %text,
                    "Received message"
                ),
                None => info!(
                    user_id = core_msg.user.id,
                    chat_id = core_msg.chat.id,
                    "Received non-text message"
                ),
            }

            dispatch(handler.as_ref(), &core_msg).await;
            respond(())
        }
    })
    .await;

    Ok(())
}

/// Runs the handler for one message. Handlers log their own failures with the level they
/// warrant, so an `Err` is only traced here at debug level and never logged again.
pub(crate) async fn dispatch(handler: &dyn Handler, message: &Message) -> Option<HandlerResponse> {
    match handler.handle(message).await {
        Ok(response) => {
            debug!(message_id = %message.id, response = ?response, "step: message dispatched");
            Some(response)
        }
        Err(_) => {
            debug!(message_id = %message.id, "step: handler returned an error");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dclock_core::{Chat, HandlerError, User};
    use std::io;
    use std::sync::Mutex;
    use tracing_subscriber::fmt::MakeWriter;

    /// Collects formatted log output in memory.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Rejects every message and logs the rejection itself, as `DialogController` does.
    struct RejectingHandler;

    #[async_trait]
    impl Handler for RejectingHandler {
        async fn handle(&self, _message: &Message) -> dclock_core::Result<HandlerResponse> {
            tracing::warn!("Input rejected, dialog not advanced");
            Err(HandlerError::InvalidInput("70.5".to_string()).into())
        }
    }

    struct IgnoringHandler;

    #[async_trait]
    impl Handler for IgnoringHandler {
        async fn handle(&self, _message: &Message) -> dclock_core::Result<HandlerResponse> {
            Ok(HandlerResponse::Ignored)
        }
    }

    fn message(text: &str) -> Message {
        Message {
            id: "1".to_string(),
            user: User {
                id: 7,
                username: Some("alice".to_string()),
                first_name: None,
                last_name: None,
            },
            chat: Chat {
                id: 7,
                chat_type: "private".to_string(),
            },
            content: text.to_string(),
            created_at: chrono::Utc::now(),
        }
    }

    /// **Test: A failing handler's error is logged once, by the handler, and not again by the dispatcher.**
    #[tokio::test]
    async fn test_dispatch_does_not_log_handler_errors_again() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .finish();
        let _default = tracing::subscriber::set_default(subscriber);

        let response = dispatch(&RejectingHandler, &message("70.5")).await;

        assert!(response.is_none());
        let output = logs.text();
        assert_eq!(output.matches("Input rejected").count(), 1, "logs: {output}");
        assert_eq!(output.lines().count(), 1, "logs: {output}");
        assert!(!output.contains("ERROR"), "logs: {output}");
    }

    #[tokio::test]
    async fn test_dispatch_returns_handler_response() {
        assert_eq!(
            dispatch(&IgnoringHandler, &message("")).await,
            Some(HandlerResponse::Ignored)
        );
    }
}
