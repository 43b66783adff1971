//! Configuration file handling
//!
//! Settings are read from TOML. Every field has a default, so an empty or
//! partial file is valid.
//!
//! ```toml
//! frankfurter_url = "https://api.frankfurter.app"
//! default_amount = 250.0
//! history_days = 7
//! ```

use crate::error::{ConverterError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_FRANKFURTER_URL: &str = "https://api.frankfurter.app";
pub const DEFAULT_EXCHANGERATE_API_URL: &str = "https://api.exchangerate-api.com/v4";

/// Longest accepted history window (ten years)
pub const MAX_HISTORY_DAYS: u32 = 3650;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the Frankfurter-style provider (catalog, latest, history)
    #[serde(default = "default_frankfurter_url")]
    pub frankfurter_url: String,
    /// Base URL of the simple `/latest/{base}` provider
    #[serde(default = "default_exchangerate_api_url")]
    pub exchangerate_api_url: String,
    /// Amount used when the user leaves the amount prompt empty
    #[serde(default = "default_amount")]
    pub default_amount: f64,
    /// Length of the history window, in days, ending today
    #[serde(default = "default_history_days")]
    pub history_days: u32,
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_frankfurter_url() -> String {
    DEFAULT_FRANKFURTER_URL.to_string()
}

fn default_exchangerate_api_url() -> String {
    DEFAULT_EXCHANGERATE_API_URL.to_string()
}

fn default_amount() -> f64 {
    1000.0
}

fn default_history_days() -> u32 {
    30
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frankfurter_url: default_frankfurter_url(),
            exchangerate_api_url: default_exchangerate_api_url(),
            default_amount: default_amount(),
            history_days: default_history_days(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Default config location: `~/.rusty-exchange/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".rusty-exchange").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Without one, the default
    /// location is tried and silently skipped when absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(config_path) => Self::from_file(config_path),
            None => match Self::default_path() {
                Some(default_config) if default_config.exists() => Self::from_file(&default_config),
                _ => Ok(Config::default()),
            },
        }
    }

    /// Read and parse a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ConverterError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        log::debug!("Loaded config from {}", path.display());
        Self::from_toml(&contents)
    }

    /// Parse TOML text and validate the result
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| ConverterError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.default_amount.is_finite() && self.default_amount > 0.0) {
            return Err(ConverterError::Config(format!(
                "default_amount must be positive, got {}",
                self.default_amount
            )));
        }
        if self.history_days > MAX_HISTORY_DAYS {
            return Err(ConverterError::Config(format!(
                "history_days must be at most {}, got {}",
                MAX_HISTORY_DAYS, self.history_days
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConverterError::Config(
                "timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
