//! Global eventdir configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PORT;
use crate::error::{EventDirError, EventDirResult};

static DEFAULT_DATA_PATH: &str = "~/events";

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Global configuration at ~/.config/eventdir/config.toml
#[derive(Serialize, Deserialize, Clone)]
pub struct GlobalConfig {
    /// Directory holding the YAML event records
    #[serde(default = "default_data_path")]
    pub data_dir: PathBuf,

    /// Port eventdir-server listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bearer token required by the review endpoints. When unset the review
    /// API is disabled entirely.
    #[serde(default)]
    pub review_token: Option<String>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            data_dir: default_data_path(),
            port: DEFAULT_PORT,
            review_token: None,
        }
    }
}

impl GlobalConfig {
    pub fn config_path() -> EventDirResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EventDirError::Config("Could not determine config directory".into()))?
            .join("eventdir");

        Ok(config_dir.join("config.toml"))
    }

    /// Write a default config file so users have something to edit.
    pub fn create_default_config(path: &Path) -> EventDirResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(&GlobalConfig::default())
            .map_err(|e| EventDirError::Serialization(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }
}
