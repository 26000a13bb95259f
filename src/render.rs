//! TUI rendering traits for rsvp-core types.
//!
//! Extension traits that add colored terminal rendering using owo_colors.

use owo_colors::OwoColorize;
use rsvp_core::Attendee;
use rsvp_core::roster::Roster;
use rsvp_core::sync::SyncStatus;
use rsvp_core::tour::{Stop, Tour};

/// Fewer seats than this are shown in red.
const LOW_SEATS: u32 = 5;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for SyncStatus {
    fn render(&self) -> String {
        let label = self.to_string();
        match self {
            SyncStatus::Local => format!("{} {}", "●".dimmed(), label.dimmed()),
            SyncStatus::Syncing => format!("{} {}", "●".yellow(), label.yellow()),
            SyncStatus::Live => format!("{} {}", "●".green(), label.green()),
            SyncStatus::Offline(_) => format!("{} {}", "●".red(), label.red()),
        }
    }
}

impl Render for Attendee {
    fn render(&self) -> String {
        let details = format!(
            "Party of {} · {}",
            self.guests,
            self.render_date()
        );
        format!("{} {}  {}", "✓".green(), self.name.bold(), details.dimmed())
    }
}

impl Render for Stop {
    fn render(&self) -> String {
        format!(
            "{}\n   {}\n   {}",
            self.name.bold(),
            self.highlight.italic(),
            self.description.dimmed()
        )
    }
}

impl Render for Tour {
    fn render(&self) -> String {
        let mut lines = vec![
            format!("🥃 {}", self.name.to_uppercase().bold()),
            format!("   {}", self.tagline.italic()),
            format!("   📅 {}", self.date),
            String::new(),
            "The Itinerary".bold().to_string(),
        ];

        for (i, stop) in self.stops.iter().enumerate() {
            lines.push(format!(" {} {}", format!("Stop {:02}", i + 1).yellow(), stop.render()));
        }

        lines.push(String::new());
        lines.push(format!("🚌 {}", self.logistics));
        lines.push(
            format!("Urgent questions: {}", self.contact)
                .dimmed()
                .to_string(),
        );

        lines.join("\n")
    }
}

/// "18", or "SOLD OUT" once the shuttle is full.
pub fn seats_label(remaining: u32) -> String {
    if remaining == 0 {
        "SOLD OUT".to_string()
    } else {
        remaining.to_string()
    }
}

pub fn render_seats(remaining: u32) -> String {
    let label = seats_label(remaining);
    let value = if remaining < LOW_SEATS {
        label.red().bold().to_string()
    } else {
        label.bold().to_string()
    };
    format!("Remaining seats: {}", value)
}

/// Simple pluralization helper
fn pluralize(word: &str, count: u32) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

/// Confirmed attendees with the guest total and the sync indicator.
pub fn render_roster(roster: &Roster, status: &SyncStatus) -> String {
    let total = roster.total_guests();
    let mut lines = vec![format!(
        "{}  {}  {}",
        "Confirmed Attendees".bold(),
        format!("{} Total {}", total, pluralize("Guest", total)).yellow(),
        status.render()
    )];

    if roster.is_empty() {
        lines.push(format!("   {}", "Be the first to RSVP!".dimmed()));
    } else {
        lines.extend(roster.iter().map(|a| format!("   {}", a.render())));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attendee(name: &str, guests: u32) -> Attendee {
        Attendee {
            id: name.to_lowercase(),
            name: name.to_string(),
            email: String::new(),
            company: None,
            title: None,
            guests,
            dietary_notes: None,
            timestamp: 1_767_225_600_000,
        }
    }

    #[test]
    fn test_seats_label() {
        assert_eq!(seats_label(18), "18");
        assert_eq!(seats_label(0), "SOLD OUT");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("Guest", 1), "Guest");
        assert_eq!(pluralize("Guest", 0), "Guests");
        assert_eq!(pluralize("Guest", 6), "Guests");
    }

    #[test]
    fn test_render_empty_roster() {
        let out = render_roster(&Roster::default(), &SyncStatus::Local);
        assert!(out.contains("Be the first to RSVP!"));
        assert!(out.contains("0 Total Guests"));
    }

    #[test]
    fn test_render_roster_lists_parties() {
        let roster = Roster::new(vec![attendee("Ada", 4), attendee("Bea", 1)]);
        let out = render_roster(&roster, &SyncStatus::Live);

        assert!(out.contains("5 Total Guests"));
        assert!(out.contains("Party of 4"));
        assert!(out.contains("2026-01-01"));
        assert!(out.contains("Live sync"));
    }

    #[test]
    fn test_render_tour_numbers_stops() {
        let out = Tour::default().render();
        assert!(out.contains("Stop 01"));
        assert!(out.contains("Stop 03"));
        assert!(out.contains("Castle & Key"));
    }
}
