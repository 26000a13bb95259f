use std::time::Duration;

/// Local storage key holding the serialized roster.
pub const ROSTER_KEY: &str = "pva-bourbon-tour-rsvps";

/// Local storage key holding the serialized sync configuration.
pub const SYNC_CONFIG_KEY: &str = "pva-bourbon-tour-sync";

/// Default interval between remote roster refreshes.
pub const DEFAULT_POLLING_INTERVAL_MS: u64 = 30_000;

/// Delay before re-fetching the roster after a remote write.
pub const RECONCILE_DELAY: Duration = Duration::from_secs(2);

/// Timeout applied to every call against the spreadsheet endpoint.
pub const REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Guest counts above this coming from the spreadsheet are treated as bad data.
pub const MAX_PLAUSIBLE_GUESTS: u32 = 100;

/// Largest party the RSVP prompt offers.
pub const MAX_PARTY_SIZE: u32 = 4;
