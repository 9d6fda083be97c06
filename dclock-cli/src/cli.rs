//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "dclock")]
#[command(about = "death-clock Telegram bot: run, init-db, stats", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Create the users table in DATABASE_URL and exit.
    InitDb,
    /// Print how many users are stored and where they are in the dialog.
    Stats,
}
