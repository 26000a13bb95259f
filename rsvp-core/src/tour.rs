//! Details of the tour guests are RSVPing to.

use serde::{Deserialize, Serialize};

/// One stop on the itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    pub name: String,
    pub highlight: String,
    pub description: String,
}

impl Stop {
    fn new(name: &str, highlight: &str, description: &str) -> Self {
        Stop {
            name: name.to_string(),
            highlight: highlight.to_string(),
            description: description.to_string(),
        }
    }
}

/// The event itself: what, when, where and how many seats.
///
/// Overridden field by field from a `[tour]` table in config.toml; anything
/// left out keeps the default event's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tour {
    pub name: String,
    pub tagline: String,
    pub date: String,
    pub max_capacity: u32,
    pub stops: Vec<Stop>,
    pub logistics: String,
    pub inclusions: String,
    pub contact: String,
}

impl Default for Tour {
    fn default() -> Self {
        Tour {
            name: "PVA Bourbon Tour 2026".to_string(),
            tagline: "The Ultimate Kentucky Triple Threat".to_string(),
            date: "Saturday, Feb 21, 2026".to_string(),
            max_capacity: 22,
            stops: vec![
                Stop::new(
                    "Buffalo Trace",
                    "America's Oldest Heritage",
                    "Home of Pappy Van Winkle and Blanton's. The best stop for bourbon history \
                     and the 'hum' for rare bottles.",
                ),
                Stop::new(
                    "Woodford Reserve",
                    "The Scenic Standard",
                    "Located in the heart of Versailles horse country, famous for photogenic \
                     copper pot stills and upscale atmosphere.",
                ),
                Stop::new(
                    "Castle & Key",
                    "The Architectural Gem",
                    "Meticulously restored 113-acre estate featuring a limestone castle, sunken \
                     European-style gardens, and a springhouse source of limestone water.",
                ),
            ],
            logistics: "Relax and enjoy the ride through scenic horse country in our dedicated \
                        22-Passenger Shuttle Transportation. Lunch is included at a local stop (TBD)."
                .to_string(),
            inclusions: "Transportation, tours, and lunch".to_string(),
            contact: "JBailey@Spocgrid.com".to_string(),
        }
    }
}

impl Tour {
    pub fn full_name(&self) -> String {
        format!("{}: {}", self.name, self.tagline)
    }

    /// Fixed instruction handed to the assistant with every request.
    pub fn system_instruction(&self) -> String {
        let stops = self
            .stops
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "\
You are the {name} Assistant. Your goal is to help guests understand the details of the upcoming tour.
Details:
- Event: {full_name}.
- Date: {date}.
- Stops: {stops}.
- Transportation: Dedicated {capacity}-passenger shuttle.
- Inclusions: {inclusions}.
- Contact: {contact}.

RSVP Fields: Name, Email, Company, Title, Party Size, and Dietary Notes.
Be polite, sophisticated, and helpful.
",
            name = self.name,
            full_name = self.full_name(),
            date = self.date,
            stops = stops,
            capacity = self.max_capacity,
            inclusions = self.inclusions,
            contact = self.contact,
        )
    }

    /// First message the assistant shows before the guest says anything.
    pub fn welcome_message(&self) -> String {
        let stops: Vec<&str> = self.stops.iter().map(|s| s.name.as_str()).collect();
        let listed = match stops.as_slice() {
            [] => String::from("the tour"),
            [only] => only.to_string(),
            [init @ .., last] => format!("{}, or {}", init.join(", "), last),
        };
        format!(
            "Welcome! I'm your {} assistant. Have any questions about our stops at {}?",
            self.name, listed
        )
    }
}
