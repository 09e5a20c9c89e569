use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
#[error("invalid value {value:?} for {key}: {reason}")]
pub struct ConfigError {
    pub key: String,
    pub value: String,
    pub reason: String,
}

pub struct Config {
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub seed: bool,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let origins: String = try_load("CORS_ORIGINS", "http://localhost:5173")?;
        Ok(Self {
            port: try_load("PORT", "7777")?,
            cors_origins: parse_origins(&origins),
            seed: try_load("SEED_TODOS", "false")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 7777,
            cors_origins: vec!["http://localhost:5173".to_string()],
            seed: false,
        }
    }
}

/// Split a comma separated origin list, dropping empties and trailing slashes.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError {
            key: key.to_string(),
            value,
            reason: e.to_string(),
        }
    })
}
