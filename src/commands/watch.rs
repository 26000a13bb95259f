use anyhow::Result;
use owo_colors::OwoColorize;
use rsvp_core::sync::{SyncOrchestrator, SyncSnapshot};

use crate::render::{render_roster, render_seats};

pub async fn run(sync: SyncOrchestrator) -> Result<()> {
    let capacity = sync.capacity();
    let mut last: Option<SyncSnapshot> = None;

    let Some(poller) = sync.spawn_polling(move |snapshot| {
        if last.as_ref() == Some(&snapshot) {
            return;
        }

        println!(
            "{}",
            format!("── {} ──", chrono::Local::now().format("%H:%M:%S")).dimmed()
        );
        println!("{}", render_roster(&snapshot.roster, &snapshot.status));
        println!("{}", render_seats(snapshot.roster.remaining_seats(capacity)));
        println!();

        last = Some(snapshot);
    }) else {
        anyhow::bail!("Remote sync is off. Turn it on with `rsvp sync enable <url>` first.");
    };

    println!(
        "{}",
        format!(
            "Refreshing every {}. Press Ctrl-C to stop.",
            humantime::format_duration(sync.config().polling_interval())
        )
        .dimmed()
    );
    println!();

    tokio::signal::ctrl_c().await?;
    poller.abort();

    Ok(())
}
