use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{ForecastSample, GeoPoint};

/// A planned route as returned by the routing provider, decoded and
/// validated. Created once per search and read-only afterward.
#[derive(Debug, Clone)]
pub struct Route {
    pub points: Vec<GeoPoint>,
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub raw_geometry: String,
}

/// Uniform-speed projection of when the traveler reaches one sampled
/// point. Recomputed on every departure or preview change, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrivalEstimate {
    pub route_point_index: usize,
    pub arrival_time: DateTime<Utc>,
    pub hours_from_now: f64,
    pub elapsed_minutes: f64,
}

/// Final display unit: a sampled point annotated with the weather expected
/// at its arrival time.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherMarker {
    pub point: GeoPoint,
    pub sample: ForecastSample,
    pub arrival_time: DateTime<Utc>,
    pub elapsed_minutes: f64,
}
