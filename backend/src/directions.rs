//! Routing-provider adapter (Mapbox Directions shape).

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use shared::GeoPoint;

use crate::coords;
use crate::error::RouteWeatherError;
use crate::models::Route;
use crate::polyline;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

#[derive(Debug, Clone)]
pub struct DirectionsClient {
    base_url: String,
    access_token: String,
    http: Client,
}

impl DirectionsClient {
    pub fn new(access_token: String) -> Result<Self, reqwest::Error> {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), access_token)
    }

    /// Client against a non-default provider URL; integration tests point
    /// this at a local stub server.
    pub fn with_base_url(base_url: String, access_token: String) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url,
            access_token,
            http,
        })
    }

    /// Requests a driving route and returns it decoded and validated.
    ///
    /// The provider finding nothing is `NoRoute`. Malformed or invalid
    /// geometry is fatal; a partial route is never returned.
    pub async fn fetch_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<Route, RouteWeatherError> {
        let url = format!(
            "{}/directions/v5/mapbox/driving/{},{};{},{}",
            self.base_url, origin.lon, origin.lat, destination.lon, destination.lat
        );
        let response: DirectionsResponse = self
            .http
            .get(url)
            .query(&[
                ("access_token", self.access_token.as_str()),
                ("geometries", "polyline6"),
                ("overview", "full"),
                ("steps", "false"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(route) = response.routes.into_iter().next() else {
            return Err(RouteWeatherError::NoRoute);
        };

        let decoded = polyline::decode(&route.geometry)?;
        let points = coords::normalize_all(decoded)?;
        if points.is_empty() {
            return Err(RouteWeatherError::NoRoute);
        }

        tracing::debug!(
            points = points.len(),
            distance_m = route.distance,
            duration_s = route.duration,
            "fetched route from directions provider"
        );

        Ok(Route {
            points,
            distance_meters: route.distance,
            duration_seconds: route.duration,
            raw_geometry: route.geometry,
        })
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<ProviderRoute>,
}

#[derive(Debug, Deserialize)]
struct ProviderRoute {
    geometry: String,
    distance: f64,
    duration: f64,
}
