//! Application configuration management.
//!
//! Configuration is stored at `~/.config/fitadmin/config.json` and covers
//! the backend URL, the transport timeout, where the credential is
//! persisted, and an optional log directory.
//!
//! `FITADMIN_API_URL` (also read from a `.env` file) overrides `api_url`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::storage::{FileStorage, KeyringStorage, SharedStorage};

/// Application name used for config/data directory paths
const APP_NAME: &str = "fitadmin";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the backend URL
pub const API_URL_ENV: &str = "FITADMIN_API_URL";

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Keyring,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub storage: StorageBackend,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            storage: StorageBackend::default(),
            log_dir: None,
        }
    }
}

impl Config {
    /// Load from the default location, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env();
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_url = url;
            }
        }
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    /// Open the persisted-slot backend selected by `storage`.
    pub fn open_storage(&self) -> Result<SharedStorage> {
        let storage: SharedStorage = match self.storage {
            StorageBackend::File => Arc::new(FileStorage::new(&Self::data_dir()?)),
            StorageBackend::Keyring => Arc::new(KeyringStorage::new()),
        };
        Ok(storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.storage, StorageBackend::File);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"api_url":"https://admin.example.com/api","storage":"keyring"}"#)
            .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_url, "https://admin.example.com/api");
        assert_eq!(config.storage, StorageBackend::Keyring);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn test_save_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            request_timeout_secs: 5,
            log_dir: Some(dir.path().join("logs")),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.request_timeout_secs, 5);
        assert_eq!(loaded.log_dir, config.log_dir);
    }
}
