//! dclock CLI: run the Telegram bot, create the database schema, print user stats. Config from env and optional CLI args.

use anyhow::Result;
use clap::Parser;
use dclock_cli::{config, init_db, load_stats, run_bot, BotConfig, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = BotConfig::load(token)?;
            run_bot(config).await
        }
        Commands::InitDb => {
            init_console_tracing();
            init_db(&config::database_url()).await
        }
        Commands::Stats => {
            let database_url = config::database_url();
            let stats = load_stats(&database_url).await?;
            println!("Database: {}", database_url);
            println!("Total users:        {}", stats.total_users);
            println!("Completed:          {}", stats.completed_users);
            println!("Awaiting lifespan:  {}", stats.awaiting_lifespan);
            println!("Awaiting birthday:  {}", stats.awaiting_birthday);
            Ok(())
        }
    }
}

/// Console-only logging for one-shot commands.
fn init_console_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .with_target(false)
        .init();
}
