mod commands;
mod logging;
mod render;
mod utils;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rsvp_core::app_config::AppConfig;
use rsvp_core::local::LocalStore;
use rsvp_core::sync::SyncOrchestrator;

use commands::submit::SubmitArgs;
use commands::sync::SyncCommand;

#[derive(Parser)]
#[command(name = "rsvp")]
#[command(about = "RSVP for the tour, see who else is coming, and ask the tour assistant")]
#[command(version)]
struct Cli {
    /// Print diagnostic logs to stderr (RSVP_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the tour, remaining seats and who's coming (default)
    Show,
    /// List confirmed attendees
    List,
    /// RSVP for the tour
    Submit(SubmitArgs),
    /// Configure syncing with a shared spreadsheet
    Sync {
        #[command(subcommand)]
        command: SyncCommand,
    },
    /// Keep the guest list on screen, refreshing from the spreadsheet
    Watch,
    /// Ask the tour assistant a single question
    Ask {
        question: Vec<String>,
    },
    /// Chat with the tour assistant
    Chat,
    /// Clear the guest list stored on this device
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = AppConfig::load().context("Failed to load config")?;
    let local = LocalStore::new(config.data_path()?);
    tracing::debug!(dir = %local.dir().display(), "Using local data directory");

    match cli.command.unwrap_or(Commands::Show) {
        Commands::Show => commands::show::run(orchestrator(&config, &local)?, &config.tour).await,
        Commands::List => commands::list::run(orchestrator(&config, &local)?).await,
        Commands::Submit(args) => {
            commands::submit::run(orchestrator(&config, &local)?, &config.tour, args).await
        }
        Commands::Sync { command } => commands::sync::run(&local, command),
        Commands::Watch => commands::watch::run(orchestrator(&config, &local)?).await,
        Commands::Ask { question } => {
            commands::assistant::ask(&config.assistant, &config.tour, &question.join(" ")).await
        }
        Commands::Chat => commands::assistant::chat(&config.assistant, &config.tour).await,
        Commands::Clear { yes } => commands::clear::run(orchestrator(&config, &local)?, yes).await,
    }
}

fn orchestrator(config: &AppConfig, local: &LocalStore) -> Result<SyncOrchestrator> {
    let sync_config = local.load_sync_config()?.effective();
    let orchestrator =
        SyncOrchestrator::new(config.tour.max_capacity, sync_config, local.clone())?;
    Ok(orchestrator)
}
