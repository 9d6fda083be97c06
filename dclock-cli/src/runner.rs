//! Wiring: store, Telegram bot and dialog controller, then the REPL.

use anyhow::{Context, Result};
use dclock_core::{init_tracing, Bot, Handler};
use dclock_dialog::DialogController;
use dclock_telegram::{run_repl, TelegramBotAdapter};
use std::sync::Arc;
use storage::{InMemoryUserRepository, SqliteUserRepository, UserStats, UserStore};
use tracing::{info, instrument, warn};

use crate::config::{BotConfig, MEMORY_DATABASE_URL};

/// Main entry: validate config, init logging, open the store, then run the REPL until shutdown.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    info!(database_url = %config.database_url, "Initializing bot");
    if config.uses_memory_store() {
        warn!("DATABASE_URL=memory: dialog state will be lost on exit");
    }

    let store = build_store(&config.database_url).await?;
    let teloxide_bot = TelegramBotAdapter::build_bot(
        &config.telegram.bot_token,
        config.telegram.telegram_api_url.as_deref(),
    )?;
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let handler: Arc<dyn Handler> = Arc::new(DialogController::new(store, bot));

    info!("Bot started successfully");
    run_repl(teloxide_bot, handler).await?;
    info!("Bot stopped");

    Ok(())
}

/// Opens the dialog state store named by `database_url`. SQLite stores get their schema created.
pub async fn build_store(database_url: &str) -> Result<Arc<dyn UserStore>> {
    if database_url == MEMORY_DATABASE_URL {
        return Ok(Arc::new(InMemoryUserRepository::new()));
    }
    let repo = SqliteUserRepository::new(database_url)
        .await
        .with_context(|| format!("Open user database at {}", database_url))?;
    Ok(Arc::new(repo))
}

/// Creates the users table (if missing) and returns.
pub async fn init_db(database_url: &str) -> Result<()> {
    if database_url == MEMORY_DATABASE_URL {
        anyhow::bail!("init-db needs a SQLite DATABASE_URL, got `memory`");
    }
    SqliteUserRepository::new(database_url)
        .await
        .with_context(|| format!("Initialize user database at {}", database_url))?;
    info!(database_url = %database_url, "Database initialized");
    Ok(())
}

pub async fn load_stats(database_url: &str) -> Result<UserStats> {
    if database_url == MEMORY_DATABASE_URL {
        anyhow::bail!("stats needs a SQLite DATABASE_URL, got `memory`");
    }
    let repo = SqliteUserRepository::new(database_url)
        .await
        .with_context(|| format!("Open user database at {}", database_url))?;
    Ok(repo.get_stats().await?)
}
