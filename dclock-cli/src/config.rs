//! Bot config: Telegram connection, logging, database. Loaded from env.

use anyhow::Result;
use dclock_telegram::TelegramConfig;
use std::env;

pub const DEFAULT_DATABASE_URL: &str = "file:./data/death_clock.db";
pub const DEFAULT_LOG_FILE: &str = "logs/death-clock.log";
/// `DATABASE_URL` value selecting the in-memory store (state is lost on exit).
pub const MEMORY_DATABASE_URL: &str = "memory";

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// BOT_TOKEN / TG_BOT_TOKEN and TELEGRAM_API_URL / TELOXIDE_API_URL
    pub telegram: TelegramConfig,
    /// Log file path
    pub log_file: String,
    /// Dialog state database (SQLite `file:` / `sqlite:` URL, plain path, or `memory`)
    pub database_url: String,
}

impl BotConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        Ok(Self {
            telegram: TelegramConfig::from_env(token)?,
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string()),
            database_url: database_url(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.telegram.validate()?;
        if self.database_url.trim().is_empty() {
            anyhow::bail!("DATABASE_URL is set but empty");
        }
        Ok(())
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }
}

/// DATABASE_URL, or the default SQLite file. Used alone by `init-db` and `stats`, which need no token.
pub fn database_url() -> String {
    env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}
