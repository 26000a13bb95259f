use anyhow::Result;
use rsvp_core::sync::SyncOrchestrator;

use crate::render::{render_roster, render_seats};
use crate::utils::tui;

pub async fn run(sync: SyncOrchestrator) -> Result<()> {
    tui::with_spinner("Loading guest list", sync.load()).await;
    let snapshot = sync.snapshot().await;

    println!("{}", render_roster(&snapshot.roster, &snapshot.status));
    println!();
    println!(
        "{}",
        render_seats(snapshot.roster.remaining_seats(sync.capacity()))
    );

    Ok(())
}
