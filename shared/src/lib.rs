use serde::{Deserialize, Serialize};

/// A validated geographic coordinate. Latitude in [-90, 90], longitude in
/// [-180, 180]; raw provider output goes through the backend's coordinate
/// gate before it becomes one of these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Weather condition as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
}

/// One weather reading, either current conditions or a forecast slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub temp_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: f64,
    pub wind_speed: f64,
    pub wind_deg: f64,
    pub precip_mm: f64,
    pub condition: Condition,
    pub timestamp_unix: i64,
}

/// Everything fetched for one location: current conditions plus the coarse
/// forecast slots. Entries in `hourly` are roughly three hours apart
/// (provider granularity), despite the name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastBundle {
    pub current: ForecastSample,
    pub hourly: Vec<ForecastSample>,
}

/// Weather endpoint response element: one bundle per queried point, in
/// request order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointForecast {
    pub point: GeoPoint,
    pub forecast: ForecastBundle,
}

/// Directions endpoint response. `coordinates` holds the sampled subset of
/// the route (at most 50 points); `geometry` keeps the provider's encoded
/// polyline for map rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResponse {
    pub coordinates: Vec<GeoPoint>,
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub geometry: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}
