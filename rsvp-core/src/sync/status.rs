use std::fmt;

use crate::roster::Roster;

/// What the status indicator shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SyncStatus {
    /// Remote sync is off; everything lives on this device.
    #[default]
    Local,
    /// A fetch or a post-write reconcile is in flight.
    Syncing,
    /// Last fetch from the spreadsheet succeeded.
    Live,
    /// Remote sync is on but the last remote call failed.
    Offline(String),
}

impl SyncStatus {
    pub fn is_error(&self) -> bool {
        matches!(self, SyncStatus::Offline(_))
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SyncStatus::Local => write!(f, "Local only"),
            SyncStatus::Syncing => write!(f, "Syncing..."),
            SyncStatus::Live => write!(f, "Live sync"),
            SyncStatus::Offline(reason) => write!(f, "Sync error: {reason}"),
        }
    }
}

/// Roster plus status, as handed to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSnapshot {
    pub roster: Roster,
    pub status: SyncStatus,
}
