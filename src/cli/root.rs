use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use super::memos::{AddCommand, EditCommand, ShowCommand};
use super::stats::StatsCommand;
use crate::config::Config;
use crate::tui;

/// Memoterm - a terminal client for the MemoApp backend
#[derive(Parser)]
#[command(
    name = "memoterm",
    version,
    about = "A terminal memo client with priority tagging and confirmation dialogs",
    long_about = r#"Memoterm is a terminal client for the MemoApp REST backend. It shows
your memos with priority tags and aggregate statistics, supports bulk
priority updates, and asks for confirmation before destructive actions.

Examples:
  memoterm                                 # Start the interactive UI
  memoterm stats                           # Print priority statistics
  memoterm --api-url http://host:8080/api  # Point at another backend"#
)]
pub struct Cli {
    /// Base URL of the memo REST API
    #[arg(long = "api-url", global = true)]
    pub api_url: Option<String>,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print priority statistics without entering the TUI
    Stats(StatsCommand),

    /// Create a new memo
    Add(AddCommand),

    /// Show a single memo
    Show(ShowCommand),

    /// Edit an existing memo
    Edit(EditCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        if self.debug {
            debug!("Debug logging enabled");
        }

        let mut config = Config::init().await?;
        if let Some(api_url) = &self.api_url {
            config.api_url = api_url.clone();
        }
        config.validate()?;
        debug!("Configuration initialized");

        match self.command {
            Some(Commands::Stats(stats_cmd)) => stats_cmd.execute(&config).await,
            Some(Commands::Add(add_cmd)) => add_cmd.execute(&config).await,
            Some(Commands::Show(show_cmd)) => show_cmd.execute(&config).await,
            Some(Commands::Edit(edit_cmd)) => edit_cmd.execute(&config).await,
            None => tui::run(&config).await,
        }
    }
}
