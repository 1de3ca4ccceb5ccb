use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::debug;

use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com";

pub const API_KEY_VAR: &str = "API_KEY";
pub const DEFAULT_CITY_VAR: &str = "DEFAULT_CITY";

/// Optional on-disk configuration.
///
/// Example TOML:
/// api_key = "..."
/// default_location = "Austin"
/// timeout_secs = 10
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub default_location: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Load config from the platform config directory, or return an empty
    /// default if it doesn't exist.
    pub fn load() -> Result<Self> {
        match Self::config_file_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("No platform config directory, skipping config file");
                Ok(Self::default())
            }
        }
    }

    /// Load config from `path`; a missing file means defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|source| Error::ConfigRead { path: path.to_path_buf(), source })?;

        Self::parse(&contents)
            .map_err(|source| Error::ConfigParse { path: path.to_path_buf(), source })
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Path to the config file, e.g. `~/.config/wx/config.toml` on Linux.
    pub fn config_file_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "wx", "wx").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

/// Immutable configuration, built once at startup.
#[derive(Clone)]
pub struct Settings {
    pub api_key: String,
    pub default_location: Option<String>,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("default_location", &self.default_location)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Settings {
    /// Load `.env` (searched from the working directory upwards), then layer
    /// the process environment over the platform config file.
    ///
    /// The `.env` file is mandatory even when the config file already holds
    /// `api_key`. Fails before any network activity if it can't be loaded.
    pub fn load() -> Result<Self> {
        let env_path = dotenvy::dotenv().map_err(Error::EnvFile)?;
        debug!(path = %env_path.display(), "Loaded .env");

        Self::from_process_env(FileConfig::load()?)
    }

    /// Same as [`Settings::load`] with explicit paths for both files.
    pub fn load_from(env_file: &Path, config_file: Option<&Path>) -> Result<Self> {
        dotenvy::from_path(env_file).map_err(Error::EnvFile)?;
        debug!(path = %env_file.display(), "Loaded .env");

        let file = match config_file {
            Some(path) => FileConfig::load_from(path)?,
            None => FileConfig::default(),
        };
        Self::from_process_env(file)
    }

    fn from_process_env(file: FileConfig) -> Result<Self> {
        Self::from_sources(file, |name| std::env::var(name).ok())
    }

    /// Environment values win over file values. Blank values count as unset.
    pub fn from_sources<F>(file: FileConfig, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let api_key = non_blank(env(API_KEY_VAR))
            .or_else(|| non_blank(file.api_key))
            .ok_or(Error::MissingApiKey)?;

        let default_location =
            non_blank(env(DEFAULT_CITY_VAR)).or_else(|| non_blank(file.default_location));

        let base_url = non_blank(file.base_url)
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            default_location,
            base_url,
            timeout: file.timeout_secs.map(Duration::from_secs),
        })
    }
}
