use anyhow::Result;
use rsvp_core::sync::SyncOrchestrator;
use rsvp_core::tour::Tour;

use crate::render::{Render, render_roster, render_seats};
use crate::utils::tui;

pub async fn run(sync: SyncOrchestrator, tour: &Tour) -> Result<()> {
    tui::with_spinner("Loading guest list", sync.load()).await;
    let snapshot = sync.snapshot().await;

    println!("{}", tour.render());
    println!();
    println!("{}", render_seats(snapshot.roster.remaining_seats(tour.max_capacity)));
    println!();
    println!("{}", render_roster(&snapshot.roster, &snapshot.status));

    Ok(())
}
