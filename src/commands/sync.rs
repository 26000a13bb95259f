use std::time::Duration;

use anyhow::Result;
use clap::Subcommand;
use owo_colors::OwoColorize;
use rsvp_core::local::LocalStore;
use rsvp_core::sync_config::SyncConfig;

#[derive(Subcommand, Debug)]
pub enum SyncCommand {
    /// Show the current sync settings
    Show,
    /// Sync the guest list with a spreadsheet endpoint
    Enable {
        /// Web app URL of the spreadsheet endpoint
        url: String,

        /// How often to refresh the guest list (e.g. "30s", "2m")
        #[arg(long, value_parser = humantime::parse_duration)]
        interval: Option<Duration>,
    },
    /// Keep the guest list on this device only
    Disable,
}

pub fn run(local: &LocalStore, command: SyncCommand) -> Result<()> {
    match command {
        SyncCommand::Show => {
            let stored = local.load_sync_config()?;
            print_config(&stored.clone().effective());
            if SyncConfig::is_overridden() {
                println!(
                    "{}",
                    "This build has a sync URL compiled in; it overrides the stored one.".dimmed()
                );
            }
        }
        SyncCommand::Enable { url, interval } => {
            let mut config = local.load_sync_config()?;
            config.url = url.trim().to_string();
            config.enabled = true;
            if let Some(interval) = interval {
                config.polling_interval_ms = interval.as_millis().max(1) as u64;
            }
            config.validate()?;
            local.save_sync_config(&config)?;

            println!("{}", "Sync enabled".green());
            print_config(&config);
            println!(
                "{}",
                "Run this on every device that should share the guest list.".dimmed()
            );
        }
        SyncCommand::Disable => {
            let mut config = local.load_sync_config()?;
            config.enabled = false;
            local.save_sync_config(&config)?;
            println!("{}", "Sync disabled; the guest list stays on this device.".yellow());
        }
    }

    Ok(())
}

fn print_config(config: &SyncConfig) {
    let state = if config.is_remote_active() {
        "on".green().to_string()
    } else {
        "off".dimmed().to_string()
    };
    let url = if config.url.is_empty() {
        "(none)".dimmed().to_string()
    } else {
        config.url.clone()
    };

    println!("   sync:     {}", state);
    println!("   url:      {}", url);
    println!(
        "   interval: {}",
        humantime::format_duration(config.polling_interval())
    );
}
