//! Global evently engine configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use evently_core::error::{EventlyError, EventlyResult};

fn default_events_collection() -> String {
    "events".to_string()
}

fn default_store_timeout_secs() -> u64 {
    10
}

/// Configuration at ~/.config/evently/config.toml
///
/// A missing file means defaults: no remote backend (the embedding
/// application wires its own `EventStore`), the `events` collection,
/// a 10s store timeout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventlyConfig {
    /// Remote store backend name (resolves to an `evently-store-<name>`
    /// binary on PATH)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,

    #[serde(default = "default_events_collection")]
    pub events_collection: String,

    #[serde(default = "default_store_timeout_secs")]
    pub store_timeout_secs: u64,
}

impl Default for EventlyConfig {
    fn default() -> Self {
        EventlyConfig {
            store: None,
            events_collection: default_events_collection(),
            store_timeout_secs: default_store_timeout_secs(),
        }
    }
}

impl EventlyConfig {
    pub fn config_path() -> EventlyResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EventlyError::Config("Could not determine config directory".into()))?
            .join("evently");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, falling back to defaults if absent.
    pub fn load() -> EventlyResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> EventlyResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: EventlyConfig =
                toml::from_str(&content).map_err(|e| EventlyError::Config(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the current config to ~/.config/evently/config.toml
    pub fn save(&self) -> EventlyResult<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> EventlyResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EventlyError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| EventlyError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| EventlyError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
