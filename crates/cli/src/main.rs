//! Bookfind CLI - progressive search against a remote book catalog

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod logging;

use commands::{cmd_config_init, cmd_config_show, cmd_health, cmd_search};
use logging::init_cli_logging;

#[derive(Parser)]
#[command(name = "bookfind")]
#[command(about = "Progressive search against a remote book catalog")]
#[command(after_help = "\
QUICK START:
  bookfind search \"harry potter\"       # Search the catalog
  bookfind search --author \"le guin\"   # Search by author
  bookfind health                      # Check catalog service status
  bookfind config init                 # Write a starter config")]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

/// Subcommands for `bookfind config`
#[derive(Subcommand)]
pub enum ConfigCommand {
  /// Write a starter bookfind.toml in the current directory
  Init,
  /// Print the effective configuration
  Show,
}

#[derive(Subcommand)]
enum Commands {
  /// Search the catalog, showing staged progress while waiting
  Search {
    /// Free-text query
    query: Option<String>,
    /// Search by title
    #[arg(long)]
    title: Option<String>,
    /// Search by author
    #[arg(long)]
    author: Option<String>,
    /// Page to fetch
    #[arg(short, long, default_value = "1")]
    page: u32,
    /// Results per page (default from config)
    #[arg(long)]
    page_size: Option<u32>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
    /// Hide the progress timeline
    #[arg(short, long)]
    quiet: bool,
  },
  /// Check catalog service health
  Health {
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
  /// Manage configuration
  Config {
    #[command(subcommand)]
    command: ConfigCommand,
  },
}

#[tokio::main]
async fn main() -> Result<()> {
  init_cli_logging();

  let cli = Cli::parse();

  match cli.command {
    Commands::Search {
      query,
      title,
      author,
      page,
      page_size,
      json,
      quiet,
    } => {
      cmd_search(
        query.as_deref(),
        title.as_deref(),
        author.as_deref(),
        page,
        page_size,
        json,
        quiet,
      )
      .await
    }
    Commands::Health { json } => cmd_health(json).await,
    Commands::Config { command } => match command {
      ConfigCommand::Init => cmd_config_init(),
      ConfigCommand::Show => cmd_config_show(),
    },
  }
}
