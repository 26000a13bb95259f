//! Core of the tour-rsvp client.
//!
//! - `attendee`, `roster` and `tour` hold the data model
//! - `local` is the device-scoped key-value store
//! - `remote` talks to the spreadsheet endpoint and cleans up its rows
//! - `sync` decides between the two and keeps the visible roster fresh
//! - `assistant` wraps the hosted model that answers questions about the tour

pub mod app_config;
pub mod assistant;
pub mod attendee;
pub mod constants;
pub mod error;
pub mod local;
pub mod remote;
pub mod roster;
pub mod sync;
pub mod sync_config;
pub mod tour;

pub use attendee::{Attendee, AttendeeDraft};
pub use error::{RsvpError, RsvpResult};
pub use roster::Roster;
pub use tour::Tour;
