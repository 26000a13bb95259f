//! The guest list and its capacity arithmetic.

use serde::{Deserialize, Serialize};

use crate::attendee::Attendee;
use crate::error::{RsvpError, RsvpResult};

/// Attendees, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster(Vec<Attendee>);

impl Roster {
    pub fn new(attendees: Vec<Attendee>) -> Self {
        Roster(attendees)
    }

    pub fn attendees(&self) -> &[Attendee] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attendee> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|a| a.id == id)
    }

    /// Sum of every party's size.
    pub fn total_guests(&self) -> u32 {
        self.0
            .iter()
            .fold(0u32, |total, a| total.saturating_add(a.guests))
    }

    /// Seats left out of `capacity`. Saturates at zero: concurrent
    /// submissions from several devices can overbook the tour.
    pub fn remaining_seats(&self, capacity: u32) -> u32 {
        capacity.saturating_sub(self.total_guests())
    }

    pub fn ensure_capacity(&self, requested: u32, capacity: u32) -> RsvpResult<()> {
        let remaining = self.remaining_seats(capacity);
        if remaining < requested {
            return Err(RsvpError::CapacityExceeded {
                requested,
                remaining,
            });
        }
        Ok(())
    }

    pub fn prepend(&mut self, attendee: Attendee) {
        self.0.insert(0, attendee);
    }

    /// Take the attendee with `id` back out, if present.
    pub fn remove(&mut self, id: &str) -> Option<Attendee> {
        let index = self.0.iter().position(|a| a.id == id)?;
        Some(self.0.remove(index))
    }

    pub fn sort_newest_first(&mut self) {
        self.0.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    }
}

impl From<Vec<Attendee>> for Roster {
    fn from(attendees: Vec<Attendee>) -> Self {
        Roster(attendees)
    }
}

impl FromIterator<Attendee> for Roster {
    fn from_iter<I: IntoIterator<Item = Attendee>>(iter: I) -> Self {
        Roster(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Attendee;
    type IntoIter = std::slice::Iter<'a, Attendee>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
pub(crate) fn make_attendee(id: &str, name: &str, guests: u32, timestamp: i64) -> Attendee {
    Attendee {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        company: None,
        title: None,
        guests,
        dietary_notes: None,
        timestamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_and_remaining() {
        let roster = Roster::new(vec![
            make_attendee("a", "Ada", 4, 2),
            make_attendee("b", "Bea", 2, 1),
        ]);
        assert_eq!(roster.total_guests(), 6);
        assert_eq!(roster.remaining_seats(22), 16);
    }

    #[test]
    fn test_remaining_saturates_when_overbooked() {
        let roster = Roster::new(vec![make_attendee("a", "Ada", 25, 1)]);
        assert_eq!(roster.remaining_seats(22), 0);
    }

    #[test]
    fn test_total_guests_saturates_on_huge_parties() {
        let roster = Roster::new(vec![
            make_attendee("a", "Ada", u32::MAX, 2),
            make_attendee("b", "Bea", 5, 1),
        ]);
        assert_eq!(roster.total_guests(), u32::MAX);
        assert_eq!(roster.remaining_seats(22), 0);
    }

    #[test]
    fn test_remove_by_id() {
        let mut roster = Roster::new(vec![
            make_attendee("a", "Ada", 4, 2),
            make_attendee("b", "Bea", 2, 1),
        ]);

        assert_eq!(roster.remove("a").map(|a| a.name), Some("Ada".to_string()));
        assert!(roster.remove("a").is_none());
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.total_guests(), 2);
    }

    #[test]
    fn test_ensure_capacity_rejects_oversized_party() {
        let roster = Roster::new(vec![make_attendee("a", "A", 4, 1)]);

        assert!(roster.ensure_capacity(18, 22).is_ok());
        match roster.ensure_capacity(19, 22) {
            Err(RsvpError::CapacityExceeded {
                requested,
                remaining,
            }) => {
                assert_eq!(requested, 19);
                assert_eq!(remaining, 18);
            }
            other => panic!("expected CapacityExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_prepend_and_sort() {
        let mut roster = Roster::new(vec![make_attendee("old", "Old", 1, 10)]);
        roster.prepend(make_attendee("new", "New", 1, 20));
        assert_eq!(roster.attendees()[0].id, "new");

        let mut unsorted: Roster = vec![
            make_attendee("a", "A", 1, 5),
            make_attendee("b", "B", 1, 50),
            make_attendee("c", "C", 1, 20),
        ]
        .into();
        unsorted.sort_newest_first();
        let ids: Vec<_> = unsorted.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }
}
