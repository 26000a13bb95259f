//! Error types for tour-rsvp.

use thiserror::Error;

/// Errors that can occur in RSVP operations.
#[derive(Error, Debug)]
pub enum RsvpError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid RSVP: {0}")]
    Validation(String),

    #[error("Not enough seats available: {requested} requested, {remaining} remaining")]
    CapacityExceeded { requested: u32, remaining: u32 },

    #[error("Remote sync error: {0}")]
    Remote(String),

    #[error("Assistant error: {0}")]
    Assistant(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for RsvpError {
    fn from(e: serde_json::Error) -> Self {
        RsvpError::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for RsvpError {
    fn from(e: reqwest::Error) -> Self {
        RsvpError::Remote(e.to_string())
    }
}

/// Result type alias for RSVP operations.
pub type RsvpResult<T> = Result<T, RsvpError>;
