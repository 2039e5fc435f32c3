pub mod cache;
pub mod config;
pub mod coords;
pub mod directions;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod polyline;
pub mod sampling;
pub mod timeline;
pub mod weather;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use shared::{ApiError, GeoPoint, PointForecast, RouteResponse};

use crate::coords::CoordinateParseError;
use crate::directions::DirectionsClient;
use crate::error::RouteWeatherError;
use crate::fetcher::ForecastService;
use crate::sampling::{sample_route, MAX_WEATHER_POINTS};

/// Upper bound on one weather batch. Per-request timeouts are shorter, so
/// a single slow point cannot stall the batch past this.
const BATCH_TIMEOUT_SECS: u64 = 45;

#[derive(Clone)]
pub struct AppState {
    pub directions: DirectionsClient,
    pub forecasts: Arc<ForecastService>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/directions", get(directions_handler))
        .route("/api/weather", get(weather_handler))
        .with_state(state)
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
struct DirectionsQuery {
    origin: String,
    destination: String,
}

async fn directions_handler(
    State(state): State<AppState>,
    Query(query): Query<DirectionsQuery>,
) -> Result<Json<RouteResponse>, (StatusCode, Json<ApiError>)> {
    let origin = coords::parse_lon_lat(&query.origin).map_err(coordinate_error)?;
    let destination = coords::parse_lon_lat(&query.destination).map_err(coordinate_error)?;

    let route = state
        .directions
        .fetch_route(origin, destination)
        .await
        .map_err(api_error)?;

    let coordinates = sample_route(&route.points, route.distance_meters);
    tracing::debug!(
        total = route.points.len(),
        sampled = coordinates.len(),
        "sampled route for weather queries"
    );

    Ok(Json(RouteResponse {
        coordinates,
        distance_meters: route.distance_meters,
        duration_seconds: route.duration_seconds,
        geometry: route.raw_geometry,
    }))
}

#[derive(Debug, Deserialize)]
struct WeatherQuery {
    coordinates: String,
    #[serde(default)]
    clear_cache: bool,
}

async fn weather_handler(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<Vec<PointForecast>>, (StatusCode, Json<ApiError>)> {
    let raw: Vec<GeoPoint> = serde_json::from_str(&query.coordinates)
        .map_err(|err| bad_request(format!("invalid coordinates parameter: {err}")))?;
    if raw.is_empty() {
        return Err(bad_request("coordinates must be a non-empty array"));
    }
    if raw.len() > MAX_WEATHER_POINTS {
        return Err(bad_request(format!(
            "at most {MAX_WEATHER_POINTS} coordinates per request"
        )));
    }

    let points = coords::normalize_all(raw)
        .map_err(|err| api_error(RouteWeatherError::InvalidCoordinate(err)))?;

    let forecasts = tokio::time::timeout(
        Duration::from_secs(BATCH_TIMEOUT_SECS),
        state.forecasts.forecasts_for(&points, query.clear_cache),
    )
    .await
    .map_err(|_| api_error(RouteWeatherError::Timeout(BATCH_TIMEOUT_SECS)))?;

    Ok(Json(forecasts))
}

fn bad_request(message: impl ToString) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError {
            message: message.to_string(),
        }),
    )
}

fn coordinate_error(err: CoordinateParseError) -> (StatusCode, Json<ApiError>) {
    match err {
        err @ CoordinateParseError::Malformed(_) => bad_request(err),
        CoordinateParseError::Invalid(inner) => {
            api_error(RouteWeatherError::InvalidCoordinate(inner))
        }
    }
}

fn api_error(err: RouteWeatherError) -> (StatusCode, Json<ApiError>) {
    let status = match &err {
        RouteWeatherError::NoRoute => StatusCode::NOT_FOUND,
        RouteWeatherError::InvalidCoordinate(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RouteWeatherError::Decode(_) | RouteWeatherError::Provider(_) => StatusCode::BAD_GATEWAY,
        RouteWeatherError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
    };
    (
        status,
        Json(ApiError {
            message: err.to_string(),
        }),
    )
}
