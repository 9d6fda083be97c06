//! Minimal transport config: token and optional Bot API URL.
//! Loaded from environment variables BOT_TOKEN (or TG_BOT_TOKEN), TELEGRAM_API_URL (or TELOXIDE_API_URL).

use anyhow::Result;
use std::env;

/// Telegram connection settings.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
}

impl TelegramConfig {
    /// Loads from the environment. `token` overrides BOT_TOKEN / TG_BOT_TOKEN when given.
    pub fn from_env(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN")
                .or_else(|_| env::var("TG_BOT_TOKEN"))
                .map_err(|_| anyhow::anyhow!("BOT_TOKEN (or TG_BOT_TOKEN) not set"))?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        Ok(Self {
            bot_token,
            telegram_api_url,
        })
    }

    /// Uses the given token; no custom API URL.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
        }
    }

    /// Rejects an empty token and a malformed API URL.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }
}
