use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::StatusError;

/// Static configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Seconds between two refreshes of the status line
    pub refresh_delay: f64,
    /// Seconds between two network checks
    pub network_delay: u64,
    /// Consecutive display failures before giving up
    pub max_fails: u32,
    /// Name of the battery under `power_supply_dir`
    pub battery_name: String,
    pub power_supply_dir: PathBuf,
    /// strftime pattern for the trailing date (see date(1))
    pub date_format: String,
    pub network_probe_host: String,
    /// Upper bound in seconds for every external command
    pub command_timeout: u64,
    /// Probe for an NVIDIA GPU at startup
    pub gpu: bool,
    /// Spot price endpoint, reserved for the price segment
    pub price_quote_url: String,
    pub price_update_delay: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_delay: 1.0 / 3.0,
            network_delay: 20,
            max_fails: 5,
            battery_name: "BAT0".to_string(),
            power_supply_dir: PathBuf::from("/sys/class/power_supply"),
            date_format: "%a, %F %T".to_string(),
            network_probe_host: "1.1.1.1".to_string(),
            command_timeout: 10,
            gpu: true,
            price_quote_url: "https://api.coinbase.com/v2/prices/ETH-USD/spot".to_string(),
            price_update_delay: 300,
        }
    }
}

impl Config {
    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, the user config file is used
    /// when present and the built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Config::default(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_toml(&data).with_context(|| format!("Invalid config file: {:?}", path))
    }

    pub fn from_toml(data: &str) -> Result<Self> {
        toml::from_str(data).map_err(|e| StatusError::config(e.to_string()).into())
    }

    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dwm-status").join("config.toml"))
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.refresh_delay.is_finite() || self.refresh_delay <= 0.0 {
            return Err(StatusError::config(format!(
                "refresh_delay must be a positive number of seconds, got {}",
                self.refresh_delay
            )));
        }
        if self.network_delay == 0 {
            return Err(StatusError::config("network_delay must be at least 1 second"));
        }
        if self.max_fails == 0 {
            return Err(StatusError::config("max_fails must be at least 1"));
        }
        if self.command_timeout == 0 {
            return Err(StatusError::config("command_timeout must be at least 1 second"));
        }
        if self.battery_name.is_empty() || self.battery_name.contains('/') {
            return Err(StatusError::config(format!(
                "invalid battery name: {:?}",
                self.battery_name
            )));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(StatusError::config(format!(
                "invalid date format: {:?}",
                self.date_format
            )));
        }
        Ok(())
    }

    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs_f64(self.refresh_delay)
    }

    pub fn network_period(&self) -> Duration {
        Duration::from_secs(self.network_delay)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout)
    }

    pub fn battery_dir(&self) -> PathBuf {
        self.power_supply_dir.join(&self.battery_name)
    }
}
