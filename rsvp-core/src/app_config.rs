//! Application configuration at ~/.config/tour-rsvp/config.toml

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{RsvpError, RsvpResult};
use crate::tour::Tour;

static APP_DIR: &str = "tour-rsvp";

pub static DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub static DEFAULT_ASSISTANT_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_assistant_url() -> String {
    DEFAULT_ASSISTANT_URL.to_string()
}

/// Settings for the tour assistant.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_assistant_url")]
    pub base_url: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        AssistantConfig {
            api_key: None,
            model: default_model(),
            base_url: default_assistant_url(),
        }
    }
}

impl AssistantConfig {
    /// Key from config.toml, falling back to GEMINI_API_KEY then API_KEY.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }
}

/// Sync settings are not in here: they are device state and live in the
/// local store alongside the roster.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Where the local store keeps its entries. Defaults to the platform
    /// data directory.
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub tour: Tour,

    #[serde(default)]
    pub assistant: AssistantConfig,
}

impl AppConfig {
    pub fn config_path() -> RsvpResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RsvpError::Config("Could not determine config directory".into()))?
            .join(APP_DIR);

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/tour-rsvp/config.toml, creating a commented-out
    /// default on first run. `RSVP__*` environment variables override
    /// file values (e.g. `RSVP__ASSISTANT__MODEL`).
    pub fn load() -> RsvpResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> RsvpResult<Self> {
        let config: AppConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("RSVP").separator("__"))
            .build()
            .map_err(|e| RsvpError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| RsvpError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Local store directory with `~` expanded.
    pub fn data_path(&self) -> RsvpResult<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(PathBuf::from(
                shellexpand::tilde(&dir.to_string_lossy()).into_owned(),
            )),
            None => Ok(dirs::data_dir()
                .ok_or_else(|| RsvpError::Config("Could not determine data directory".into()))?
                .join(APP_DIR)),
        }
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> RsvpResult<()> {
        let contents = format!(
            "\
# tour-rsvp configuration

# Where the guest list and sync settings are stored on this device:
# data_dir = \"~/.local/share/{APP_DIR}\"

# Tour assistant (the key can also come from GEMINI_API_KEY):
# [assistant]
# api_key = \"...\"
# model = \"{DEFAULT_MODEL}\"

# Override parts of the tour description; unset fields keep their defaults:
# [tour]
# name = \"PVA Bourbon Tour 2026\"
# max_capacity = 22
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RsvpError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| RsvpError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_file_loads_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        AppConfig::create_default_config(&path).unwrap();
        let config = AppConfig::load_from(&path).unwrap();

        assert!(config.data_dir.is_none());
        assert_eq!(config.tour, Tour::default());
        assert_eq!(config.assistant.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_config_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
data_dir = "/tmp/rsvp-data"

[assistant]
model = "gemini-test"

[tour]
name = "Distillery Day"
tagline = "A Short Trip"
date = "Friday"
max_capacity = 10
stops = []
logistics = "Meet at the lot."
inclusions = "Snacks"
contact = "host@example.com"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.data_path().unwrap(), PathBuf::from("/tmp/rsvp-data"));
        assert_eq!(config.assistant.model, "gemini-test");
        assert_eq!(config.assistant.base_url, DEFAULT_ASSISTANT_URL);
        assert_eq!(config.tour.max_capacity, 10);
        assert!(config.tour.stops.is_empty());
    }

    #[test]
    fn test_partial_tour_table_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[tour]\nname = \"PVA Bourbon Tour 2026\"\nmax_capacity = 30\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        let defaults = Tour::default();
        assert_eq!(config.tour.max_capacity, 30);
        assert_eq!(config.tour.tagline, defaults.tagline);
        assert_eq!(config.tour.stops, defaults.stops);
        assert_eq!(config.tour.contact, defaults.contact);
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.tour.max_capacity, 22);
    }
}
