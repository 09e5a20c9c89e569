use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

use crate::view::ViewOptions;

pub const DEFAULT_API_URL: &str = "http://localhost:7777";

#[derive(Error, Debug)]
#[error("invalid value {value:?} for {key}: {reason}")]
pub struct ConfigError {
    pub key: String,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub allow_create: bool,
}

impl Config {
    /// Read `TODO_API_URL` and `TODO_ALLOW_CREATE` from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: try_load("TODO_API_URL", DEFAULT_API_URL)?,
            allow_create: try_load("TODO_ALLOW_CREATE", "true")?,
        })
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            allow_create: self.allow_create,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            allow_create: true,
        }
    }
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
