//! Shared coordinate gate.
//!
//! Every raw coordinate entering the system passes through here exactly
//! once: decoded route geometry, origin/destination query parameters and
//! weather-query points alike. Downstream code never re-checks ranges or
//! branches on coordinate shapes.

use std::fmt;

use shared::GeoPoint;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn limit(self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => f.write_str("latitude"),
            Axis::Longitude => f.write_str("longitude"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("invalid {axis} {value} (originally {original})")]
pub struct InvalidCoordinateError {
    pub axis: Axis,
    pub value: f64,
    pub original: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum CoordinateParseError {
    #[error("expected \"lon,lat\", got {0:?}")]
    Malformed(String),
    #[error(transparent)]
    Invalid(#[from] InvalidCoordinateError),
}

/// Normalizes one raw coordinate pair.
///
/// Values scaled 10x too large by a known upstream decoding defect are
/// divided by 10 once; anything still out of range afterward, or NaN, is
/// rejected with both the corrected and the original value.
pub fn normalize(raw: GeoPoint) -> Result<GeoPoint, InvalidCoordinateError> {
    Ok(GeoPoint {
        lat: correct(raw.lat, Axis::Latitude)?,
        lon: correct(raw.lon, Axis::Longitude)?,
    })
}

/// Runs the gate over a whole point sequence, failing on the first bad
/// coordinate.
pub fn normalize_all(raw: Vec<GeoPoint>) -> Result<Vec<GeoPoint>, InvalidCoordinateError> {
    raw.into_iter().map(normalize).collect()
}

/// Parses the API's `"lon,lat"` query format and gates the result.
pub fn parse_lon_lat(raw: &str) -> Result<GeoPoint, CoordinateParseError> {
    let malformed = || CoordinateParseError::Malformed(raw.to_string());
    let (lon, lat) = raw.split_once(',').ok_or_else(malformed)?;
    let lon: f64 = lon.trim().parse().map_err(|_| malformed())?;
    let lat: f64 = lat.trim().parse().map_err(|_| malformed())?;
    Ok(normalize(GeoPoint { lat, lon })?)
}

fn correct(original: f64, axis: Axis) -> Result<f64, InvalidCoordinateError> {
    let mut value = original;
    if value.abs() > axis.limit() {
        tracing::warn!("correcting {axis} {value}: out of range, dividing by 10");
        value /= 10.0;
    }
    if value.is_nan() || value.abs() > axis.limit() {
        return Err(InvalidCoordinateError {
            axis,
            value,
            original,
        });
    }
    Ok(value)
}
