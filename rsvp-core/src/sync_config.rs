//! Settings for syncing the roster with a spreadsheet endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_POLLING_INTERVAL_MS;
use crate::error::{RsvpError, RsvpResult};

/// Endpoint baked in at compile time. When set it wins over whatever the
/// device has stored, so every install of a build talks to the same sheet.
const BUILD_SYNC_URL: Option<&str> = option_env!("RSVP_SYNC_URL");

fn default_polling_interval() -> u64 {
    DEFAULT_POLLING_INTERVAL_MS
}

/// Stored on the device next to the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(rename = "pollingInterval", default = "default_polling_interval")]
    pub polling_interval_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            url: String::new(),
            enabled: false,
            polling_interval_ms: DEFAULT_POLLING_INTERVAL_MS,
        }
    }
}

impl SyncConfig {
    pub fn remote(url: impl Into<String>) -> Self {
        SyncConfig {
            url: url.into(),
            enabled: true,
            ..Default::default()
        }
    }

    /// Reads and writes go to the endpoint only when sync is switched on
    /// and there is somewhere to send them.
    pub fn is_remote_active(&self) -> bool {
        self.enabled && !self.url.trim().is_empty()
    }

    pub fn polling_interval(&self) -> Duration {
        Duration::from_millis(self.polling_interval_ms.max(1))
    }

    /// Apply the compile-time override, if any.
    pub fn effective(self) -> Self {
        self.with_override(BUILD_SYNC_URL)
    }

    fn with_override(self, url: Option<&str>) -> Self {
        match url.map(str::trim).filter(|u| !u.is_empty()) {
            Some(url) => SyncConfig {
                url: url.to_string(),
                enabled: true,
                ..self
            },
            None => self,
        }
    }

    pub fn is_overridden() -> bool {
        BUILD_SYNC_URL.is_some_and(|u| !u.trim().is_empty())
    }

    pub fn validate(&self) -> RsvpResult<()> {
        if !self.enabled {
            return Ok(());
        }

        let parsed = url::Url::parse(self.url.trim())
            .map_err(|e| RsvpError::Config(format!("Invalid sync URL '{}': {e}", self.url)))?;

        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(RsvpError::Config(format!(
                "Sync URL must use http or https, got '{other}'"
            ))),
        }
    }
}
