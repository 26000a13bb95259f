//! Attendee records and the RSVP form input they are created from.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RsvpError, RsvpResult};

const ID_LEN: usize = 9;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A confirmed RSVP.
///
/// Company and title only exist on some spreadsheet layouts, so both are
/// optional and skipped when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub guests: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_notes: Option<String>,
    /// Creation time in epoch milliseconds.
    pub timestamp: i64,
}

impl Attendee {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// Date the RSVP was made, for display ("2026-01-14"), or "unknown".
    pub fn render_date(&self) -> String {
        match self.created_at() {
            Some(dt) if self.timestamp > 0 => dt.format("%Y-%m-%d").to_string(),
            _ => "unknown".to_string(),
        }
    }
}

impl fmt::Display for Attendee {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Generate a short client-side identifier (9 base-36 characters).
pub fn generate_id() -> String {
    let mut n = uuid::Uuid::new_v4().as_u128();
    let mut id = String::with_capacity(ID_LEN);
    for _ in 0..ID_LEN {
        id.push(ID_ALPHABET[(n % 36) as usize] as char);
        n /= 36;
    }
    id
}

/// What the guest typed into the RSVP form.
#[derive(Debug, Clone, Default)]
pub struct AttendeeDraft {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub title: Option<String>,
    pub guests: u32,
    pub dietary_notes: Option<String>,
}

impl AttendeeDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>, guests: u32) -> Self {
        AttendeeDraft {
            name: name.into(),
            email: email.into(),
            guests,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> RsvpResult<()> {
        if self.name.trim().is_empty() {
            return Err(RsvpError::Validation("name is required".into()));
        }
        if self.guests < 1 {
            return Err(RsvpError::Validation(
                "party size must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Turn the draft into a record with a fresh id, stamped at `now`.
    pub fn into_attendee(self, now: DateTime<Utc>) -> RsvpResult<Attendee> {
        self.validate()?;

        Ok(Attendee {
            id: generate_id(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            company: non_blank(self.company),
            title: non_blank(self.title),
            guests: self.guests,
            dietary_notes: non_blank(self.dietary_notes),
            timestamp: now.timestamp_millis(),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id();
        assert_eq!(id.len(), 9);
        assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_ne!(generate_id(), generate_id());
    }

    #[test]
    fn test_draft_requires_name() {
        let draft = AttendeeDraft::new("   ", "a@example.com", 2);
        assert!(matches!(draft.validate(), Err(RsvpError::Validation(_))));
    }

    #[test]
    fn test_draft_requires_positive_party() {
        let draft = AttendeeDraft::new("Ada", "a@example.com", 0);
        assert!(matches!(draft.validate(), Err(RsvpError::Validation(_))));
    }

    #[test]
    fn test_into_attendee_trims_and_drops_blank_optionals() {
        let now = Utc.with_ymd_and_hms(2026, 1, 14, 12, 0, 0).unwrap();
        let draft = AttendeeDraft {
            name: "  Ada Lovelace ".into(),
            email: "ada@example.com".into(),
            company: Some("  ".into()),
            title: Some("Engineer".into()),
            guests: 2,
            dietary_notes: Some(String::new()),
        };

        let attendee = draft.into_attendee(now).unwrap();
        assert_eq!(attendee.name, "Ada Lovelace");
        assert_eq!(attendee.company, None);
        assert_eq!(attendee.title.as_deref(), Some("Engineer"));
        assert_eq!(attendee.dietary_notes, None);
        assert_eq!(attendee.timestamp, now.timestamp_millis());
        assert_eq!(attendee.render_date(), "2026-01-14");
    }

    #[test]
    fn test_serializes_with_sheet_keys() {
        let attendee = Attendee {
            id: "abc123def".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            company: None,
            title: None,
            guests: 3,
            dietary_notes: Some("Vegetarian".into()),
            timestamp: 1_767_000_000_000,
        };

        let json = serde_json::to_value(&attendee).unwrap();
        assert_eq!(json["dietaryNotes"], "Vegetarian");
        assert_eq!(json["guests"], 3);
        assert!(json.get("company").is_none());
    }
}
