use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use rsvp_core::sync::SyncOrchestrator;

pub async fn run(sync: SyncOrchestrator, yes: bool) -> Result<()> {
    // Confirm unless --yes
    if !yes {
        let prompt = if sync.is_remote_active() {
            "Clear the guest list on this device? The shared sheet is not touched."
        } else {
            "Clear the guest list on this device? This cannot be undone."
        };
        let confirmed = Confirm::new().with_prompt(prompt).default(false).interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    sync.clear_view().await?;

    println!("{}", "Local guest list cleared".dimmed());
    if sync.is_remote_active() {
        println!(
            "{}",
            "It will come back from the guest sheet on the next refresh.".dimmed()
        );
    }

    Ok(())
}
