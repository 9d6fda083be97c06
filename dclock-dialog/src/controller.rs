//! Dialog controller: the per-message entry point.
//!
//! **Data flow:** lock username → ensure record exists → read → classify → [`transition`] →
//! persist → reply. Persisting strictly before replying means a failed write never produces
//! a confirmation the user can see.

use crate::clock::{Clock, SystemClock};
use crate::error::{DialogError, Result};
use crate::input::classify;
use crate::locks::UserLocks;
use crate::machine::{transition, DialogState, Reply, Transition};
use async_trait::async_trait;
use dclock_core::{Bot, Chat, Handler, HandlerResponse, Message};
use std::sync::Arc;
use storage::{UserDialogState, UserStore};
use tracing::{debug, error, info, instrument, warn};

pub struct DialogController {
    store: Arc<dyn UserStore>,
    bot: Arc<dyn Bot>,
    clock: Arc<dyn Clock>,
    locks: UserLocks,
}

impl DialogController {
    pub fn new(store: Arc<dyn UserStore>, bot: Arc<dyn Bot>) -> Self {
        Self::with_clock(store, bot, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn UserStore>, bot: Arc<dyn Bot>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            bot,
            clock,
            locks: UserLocks::new(),
        }
    }

    /// Processes one inbound message for `username` and returns the resulting dialog state.
    ///
    /// Messages of the same username are serialized; different usernames run concurrently.
    #[instrument(skip(self, text, chat), fields(chat_id = chat.id))]
    pub async fn process(&self, text: &str, chat: &Chat, username: &str) -> Result<DialogState> {
        let _guard = self.locks.acquire(username).await;

        let record = self.load_or_create(username).await?;
        let input = classify(text);
        debug!(
            username = %username,
            stage = ?DialogState::of(&record),
            input = ?input,
            "step: input classified"
        );

        let step = transition(&record, &input, self.clock.now())?;
        let next_state = step
            .persist
            .as_ref()
            .map(DialogState::of)
            .unwrap_or_else(|| DialogState::of(&record));

        self.apply(chat, step).await?;

        info!(username = %username, stage = ?next_state, "step: message processed");
        Ok(next_state)
    }

    async fn load_or_create(&self, username: &str) -> Result<UserDialogState> {
        if !self.store.exists(username).await? {
            info!(username = %username, "New user, creating dialog state");
            self.store.create(username).await?;
        }
        Ok(self.store.read(username).await?)
    }

    async fn apply(&self, chat: &Chat, step: Transition) -> Result<()> {
        if let Some(state) = &step.persist {
            self.store.write(state).await?;
            debug!(username = %state.username, "step: state persisted");
        }

        for reply in &step.replies {
            self.send(chat, reply).await?;
        }
        Ok(())
    }

    async fn send(&self, chat: &Chat, reply: &Reply) -> Result<()> {
        let sent = match &reply.keyboard {
            Some(keyboard) => {
                self.bot
                    .send_message_with_keyboard(chat, &reply.text, keyboard)
                    .await
            }
            None => self.bot.send_message(chat, &reply.text).await,
        };
        sent.map_err(DialogError::Transport)
    }
}

#[async_trait]
impl Handler for DialogController {
    async fn handle(&self, message: &Message) -> dclock_core::Result<HandlerResponse> {
        if message.content.trim().is_empty() {
            return Ok(HandlerResponse::Ignored);
        }

        let username = message.user.dialog_key();
        match self.process(&message.content, &message.chat, &username).await {
            Ok(_) => Ok(HandlerResponse::Handled),
            Err(e) if e.is_rejection() => {
                warn!(error = %e, username = %username, "Input rejected, dialog not advanced");
                Err(e.into())
            }
            Err(e) => {
                error!(error = %e, username = %username, "Failed to process message");
                Err(e.into())
            }
        }
    }
}
