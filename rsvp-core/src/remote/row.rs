//! Turning loosely typed spreadsheet rows into attendees.
//!
//! The Apps Script endpoint lowercases and de-spaces its header row, but
//! sheets created by hand drift: `Dietary Notes`, `dietary_notes`,
//! `dietaryNotes` all show up, numbers arrive as strings, timestamps arrive
//! as epoch millis or as formatted dates, and older sheets have no company
//! or title columns at all.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::attendee::Attendee;
use crate::constants::MAX_PLAUSIBLE_GUESTS;
use crate::roster::Roster;

/// Normalize raw rows into a roster, newest first. Rows without an id or a
/// name are dropped.
pub fn normalize_rows(rows: Vec<Value>) -> Roster {
    let total = rows.len();
    let mut unknown_columns = BTreeSet::new();

    let mut roster: Roster = rows
        .iter()
        .filter_map(|row| row.as_object())
        .filter_map(|row| normalize_row(row, &mut unknown_columns))
        .collect();

    roster.sort_newest_first();

    if roster.len() < total {
        tracing::debug!(
            kept = roster.len(),
            dropped = total - roster.len(),
            "Dropped spreadsheet rows without id or name"
        );
    }
    if !unknown_columns.is_empty() {
        tracing::debug!(columns = ?unknown_columns, "Spreadsheet has unrecognized columns");
    }

    roster
}

/// Canonical field a column header maps to.
fn canonical_key(key: &str) -> Option<&'static str> {
    let folded: String = key
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect();

    match folded.as_str() {
        "id" => Some("id"),
        "name" | "fullname" => Some("name"),
        "email" | "emailaddress" => Some("email"),
        "company" | "organization" | "organisation" => Some("company"),
        "title" | "jobtitle" => Some("title"),
        "guests" | "partysize" => Some("guests"),
        "dietarynotes" | "dietary" => Some("dietarynotes"),
        "timestamp" => Some("timestamp"),
        _ => None,
    }
}

fn normalize_row(row: &Map<String, Value>, unknown: &mut BTreeSet<String>) -> Option<Attendee> {
    let mut fields = Map::new();
    for (key, value) in row {
        match canonical_key(key) {
            // First spelling wins if a sheet carries two variants.
            Some(canonical) => {
                fields.entry(canonical).or_insert_with(|| value.clone());
            }
            None => {
                unknown.insert(key.clone());
            }
        }
    }

    let id = text(fields.get("id"))?;
    let name = text(fields.get("name"))?;

    Some(Attendee {
        id,
        name,
        email: text(fields.get("email")).unwrap_or_default(),
        company: text(fields.get("company")),
        title: text(fields.get("title")),
        guests: coerce_guests(fields.get("guests")),
        dietary_notes: text(fields.get("dietarynotes")),
        timestamp: coerce_timestamp(fields.get("timestamp")),
    })
}

/// Non-blank string content of a cell. Numbers are stringified since ids
/// typed into a sheet by hand often come back numeric.
fn text(value: Option<&Value>) -> Option<String> {
    let s = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

fn number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

/// Party size. Anything unusable resets to 1: values above
/// `MAX_PLAUSIBLE_GUESTS` usually mean the timestamp column slid into the
/// guests column.
pub fn coerce_guests(value: Option<&Value>) -> u32 {
    match number(value) {
        Some(n) if n >= 1.0 && n <= MAX_PLAUSIBLE_GUESTS as f64 => n.trunc() as u32,
        _ => 1,
    }
}

/// Epoch milliseconds from a number, a numeric string, or a date string.
/// Unparsable values become 0 so they sort last.
pub fn coerce_timestamp(value: Option<&Value>) -> i64 {
    if let Some(n) = number(value) {
        return n.trunc() as i64;
    }

    let Some(Value::String(s)) = value else {
        return 0;
    };
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.timestamp_millis();
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return dt.timestamp_millis();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return naive.and_utc().timestamp_millis();
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return naive.and_utc().timestamp_millis();
        }
    }

    0
}
