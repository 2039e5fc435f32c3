//! Startup configuration from environment variables.

use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub mapbox_token: String,
    pub openweather_key: String,
    pub cache_ttl: Duration,
}

impl AppConfig {
    /// Reads configuration from the environment. Provider credentials are
    /// required; everything else has defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            port: parsed_or("PORT", DEFAULT_PORT)?,
            mapbox_token: required("MAPBOX_TOKEN")?,
            openweather_key: required("OPENWEATHER_KEY")?,
            cache_ttl: Duration::from_secs(parsed_or("CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?),
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn parsed_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidVar { name, value: raw }),
        Err(_) => Ok(default),
    }
}
