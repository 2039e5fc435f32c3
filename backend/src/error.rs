use thiserror::Error;

use crate::coords::InvalidCoordinateError;
use crate::polyline::DecodeError;

#[derive(Debug, Error)]
pub enum RouteWeatherError {
    #[error("failed to decode route geometry: {0}")]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinateError),
    #[error("no route found between origin and destination")]
    NoRoute,
    #[error("routing provider request failed: {0}")]
    Provider(#[from] reqwest::Error),
    #[error("weather batch timed out after {0} seconds")]
    Timeout(u64),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {name}: {value:?}")]
    InvalidVar { name: &'static str, value: String },
}
