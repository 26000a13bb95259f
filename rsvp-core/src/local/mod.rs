//! Device-local key-value store.
//!
//! Each key is a JSON file in the data directory. Two keys are used: the
//! roster and the sync configuration.

use std::path::{Path, PathBuf};

use crate::constants::{ROSTER_KEY, SYNC_CONFIG_KEY};
use crate::error::RsvpResult;
use crate::roster::Roster;
use crate::sync_config::SyncConfig;

#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        LocalStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn get_item(&self, key: &str) -> RsvpResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    pub fn set_item(&self, key: &str, value: &str) -> RsvpResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    pub fn remove_item(&self, key: &str) -> RsvpResult<()> {
        let path = self.path_for(key);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Cached roster. A corrupt entry reads as empty rather than failing.
    pub fn load_roster(&self) -> RsvpResult<Roster> {
        let Some(raw) = self.get_item(ROSTER_KEY)? else {
            return Ok(Roster::default());
        };

        match serde_json::from_str(&raw) {
            Ok(roster) => Ok(roster),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load RSVPs from local storage");
                Ok(Roster::default())
            }
        }
    }

    pub fn save_roster(&self, roster: &Roster) -> RsvpResult<()> {
        let json = serde_json::to_string(roster)?;
        self.set_item(ROSTER_KEY, &json)
    }

    pub fn clear_roster(&self) -> RsvpResult<()> {
        self.remove_item(ROSTER_KEY)
    }

    pub fn load_sync_config(&self) -> RsvpResult<SyncConfig> {
        let Some(raw) = self.get_item(SYNC_CONFIG_KEY)? else {
            return Ok(SyncConfig::default());
        };

        match serde_json::from_str(&raw) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!(error = %e, "Stored sync settings are unreadable, using defaults");
                Ok(SyncConfig::default())
            }
        }
    }

    pub fn save_sync_config(&self, config: &SyncConfig) -> RsvpResult<()> {
        let json = serde_json::to_string_pretty(config)?;
        self.set_item(SYNC_CONFIG_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::make_attendee;

    #[test]
    fn test_missing_entries_read_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("store"));

        assert!(store.load_roster().unwrap().is_empty());
        assert_eq!(store.load_sync_config().unwrap(), SyncConfig::default());
        assert_eq!(store.get_item("anything").unwrap(), None);
    }

    #[test]
    fn test_roster_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let roster = Roster::new(vec![make_attendee("a1", "Ada", 2, 100)]);

        store.save_roster(&roster).unwrap();

        let reopened = LocalStore::new(dir.path());
        assert_eq!(reopened.load_roster().unwrap(), roster);
        assert!(dir.path().join("pva-bourbon-tour-rsvps.json").exists());
    }

    #[test]
    fn test_corrupt_roster_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        store.set_item(ROSTER_KEY, "{not json").unwrap();

        assert!(store.load_roster().unwrap().is_empty());
    }

    #[test]
    fn test_clear_roster_keeps_sync_config() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let config = SyncConfig::remote("https://example.com/exec");

        store
            .save_roster(&Roster::new(vec![make_attendee("a1", "Ada", 1, 1)]))
            .unwrap();
        store.save_sync_config(&config).unwrap();
        store.clear_roster().unwrap();

        assert!(store.load_roster().unwrap().is_empty());
        assert_eq!(store.load_sync_config().unwrap(), config);
    }
}
