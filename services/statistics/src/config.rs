//! Window configuration
//!
//! Defaults match a one-minute window maintained once per second. Values
//! can be overridden from the environment.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const ENV_WINDOW_SECONDS: &str = "STATS_WINDOW_SECONDS";
pub const ENV_MAINTENANCE_INTERVAL_MS: &str = "STATS_MAINTENANCE_INTERVAL_MS";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("validation error: {0}")]
    Validation(String),
}

/// Configuration for the sliding window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    /// Length of the trailing window in seconds.
    pub window_seconds: u32,
    /// Cadence of the periodic eviction pass in milliseconds.
    pub maintenance_interval_ms: u64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            window_seconds: 60,
            maintenance_interval_ms: 1_000,
        }
    }
}

impl WindowConfig {
    /// Build a config with the given window length and default cadence.
    pub fn with_window_seconds(window_seconds: u32) -> Self {
        Self {
            window_seconds,
            ..Self::default()
        }
    }

    /// Load from `STATS_*` environment variables, defaulting unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            window_seconds: parse_or(&lookup, ENV_WINDOW_SECONDS, defaults.window_seconds)?,
            maintenance_interval_ms: parse_or(
                &lookup,
                ENV_MAINTENANCE_INTERVAL_MS,
                defaults.maintenance_interval_ms,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_seconds == 0 {
            return Err(ConfigError::Validation(
                "window_seconds must be greater than zero".to_string(),
            ));
        }
        if self.maintenance_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "maintenance_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn maintenance_interval(&self) -> Duration {
        Duration::from_millis(self.maintenance_interval_ms)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key,
            value: raw,
        }),
        None => Ok(default),
    }
}
