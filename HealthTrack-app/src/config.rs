use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use healthtrack_domain::services::pressure_form::DEFAULT_SUCCESS_HOLD;
use healthtrack_domain::services::saver::DEFAULT_SAVE_LATENCY;

pub const SAVE_LATENCY_VAR: &str = "HEALTHTRACK_SAVE_LATENCY_MS";
pub const SUCCESS_HOLD_VAR: &str = "HEALTHTRACK_SUCCESS_HOLD_MS";
pub const SAVER_VAR: &str = "HEALTHTRACK_SAVER";

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A duration variable is not a whole number of milliseconds
    #[error("{key} must be a number of milliseconds, got '{value}'")]
    InvalidDuration { key: &'static str, value: String },

    /// Unknown saver name
    #[error("HEALTHTRACK_SAVER must be 'simulated' or 'memory', got '{0}'")]
    UnknownSaver(String),
}

/// Which saver backs the pressure form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaverKind {
    /// Fixed latency, always succeeds, nothing kept
    #[default]
    Simulated,
    /// Keeps readings in the in-memory repository
    Memory,
}

impl FromStr for SaverKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simulated" => Ok(SaverKind::Simulated),
            "memory" => Ok(SaverKind::Memory),
            _ => Err(ConfigError::UnknownSaver(s.to_string())),
        }
    }
}

/// Runtime settings of the console host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Delay of the simulated save
    pub save_latency: Duration,
    /// How long the success indicator stays before navigating
    pub success_hold: Duration,
    /// Saver backing the pressure form
    pub saver: SaverKind,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            save_latency: DEFAULT_SAVE_LATENCY,
            success_hold: DEFAULT_SUCCESS_HOLD,
            saver: SaverKind::default(),
        }
    }
}

impl AppConfig {
    /// Read settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults for unset keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let save_latency = match lookup(SAVE_LATENCY_VAR) {
            Some(value) => parse_millis(SAVE_LATENCY_VAR, &value)?,
            None => defaults.save_latency,
        };
        let success_hold = match lookup(SUCCESS_HOLD_VAR) {
            Some(value) => parse_millis(SUCCESS_HOLD_VAR, &value)?,
            None => defaults.success_hold,
        };
        let saver = match lookup(SAVER_VAR) {
            Some(value) => value.parse()?,
            None => defaults.saver,
        };

        Ok(Self {
            save_latency,
            success_hold,
            saver,
        })
    }
}

fn parse_millis(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::InvalidDuration {
            key,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.save_latency, Duration::from_secs(2));
        assert_eq!(config.success_hold, Duration::from_secs(2));
        assert_eq!(config.saver, SaverKind::Simulated);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (SAVE_LATENCY_VAR, "250"),
            (SUCCESS_HOLD_VAR, " 100 "),
            (SAVER_VAR, "Memory"),
        ]))
        .unwrap();
        assert_eq!(config.save_latency, Duration::from_millis(250));
        assert_eq!(config.success_hold, Duration::from_millis(100));
        assert_eq!(config.saver, SaverKind::Memory);
    }

    #[test]
    fn test_invalid_values() {
        let err = AppConfig::from_lookup(lookup(&[(SAVE_LATENCY_VAR, "soon")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidDuration {
                key: SAVE_LATENCY_VAR,
                value: "soon".to_string()
            }
        );

        let err = AppConfig::from_lookup(lookup(&[(SAVER_VAR, "postgres")])).unwrap_err();
        assert_eq!(err, ConfigError::UnknownSaver("postgres".to_string()));
    }
}
