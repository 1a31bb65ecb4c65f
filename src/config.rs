//! Application configuration
//!
//! Optional TOML settings file merged under the CLI flags. Everything has a
//! sensible default, so the tool runs without any configuration at all;
//! the file exists for users who want a permanent download directory, a
//! mirror API root, or different pacing.
//!
//! Default location: `<config dir>/mod_fetcher/config.toml`.
//!
//! ```toml
//! [download]
//! dir = "/home/user/minecraft/mods"
//! transfer_delay = "300ms"
//!
//! [network]
//! rate_limit_rps = 5
//! request_timeout = "60s"
//!
//! [search]
//! debounce = "300ms"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::ClientConfig;
use crate::constants::{acquire, catalog, http, limits};
use crate::errors::ConfigError;

/// Download settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadSettings {
    /// Directory artifacts are transferred into
    pub dir: Option<PathBuf>,
    /// Delay after each transfer attempt
    #[serde(with = "humantime_serde")]
    pub transfer_delay: Duration,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            dir: None,
            transfer_delay: acquire::TRANSFER_DELAY,
        }
    }
}

/// Network settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    /// Alternative API root (mirror)
    pub api_base: Option<String>,
    /// Client-side rate limit (requests per second)
    pub rate_limit_rps: u32,
    /// Request timeout
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            api_base: None,
            rate_limit_rps: limits::DEFAULT_RATE_LIMIT_RPS,
            request_timeout: http::DEFAULT_TIMEOUT,
        }
    }
}

/// Search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Free-text keystroke coalescing window
    #[serde(with = "humantime_serde")]
    pub debounce: Duration,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce: catalog::SEARCH_DEBOUNCE,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub download: DownloadSettings,
    pub network: NetworkSettings,
    pub search: SearchSettings,
}

impl AppConfig {
    /// Default configuration file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mod_fetcher").join("config.toml"))
    }

    /// Load configuration, tolerating a missing default file
    ///
    /// An explicitly given path must exist; the default path is optional.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or
    /// validated
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(explicit) => Self::from_file(explicit),
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::from_file(&default),
                _ => Ok(Self::default()),
            },
        }
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        debug!("loading configuration from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.network.rate_limit_rps == 0 {
            return Err(ConfigError::InvalidValue {
                field: "network.rate_limit_rps".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Effective download directory: configured, else the platform's
    /// download folder, else `./mods`
    pub fn download_dir(&self) -> PathBuf {
        self.download
            .dir
            .clone()
            .or_else(|| dirs::download_dir().map(|d| d.join("mods")))
            .unwrap_or_else(|| PathBuf::from("mods"))
    }

    /// HTTP client configuration derived from the network settings
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            request_timeout: self.network.request_timeout,
            rate_limit_rps: self.network.rate_limit_rps,
            ..ClientConfig::default()
        }
    }
}
