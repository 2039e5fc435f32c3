//! Weather-provider client (OpenWeather shape): current conditions plus
//! the coarse 3-hourly forecast for a single point, merged into one
//! bundle.

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use shared::{Condition, ForecastBundle, ForecastSample, GeoPoint};
use thiserror::Error;

/// Forecast slots kept per bundle (~48h worth of 3-hour entries).
pub const FORECAST_SLOTS: usize = 16;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Error)]
pub enum ForecastFetchError {
    #[error("weather provider request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("weather payload carries no condition data")]
    MissingCondition,
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Result<Self, reqwest::Error> {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), api_key)
    }

    /// Client against a non-default provider URL; integration tests point
    /// this at a local stub server.
    pub fn with_base_url(base_url: String, api_key: String) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url,
            api_key,
            http,
        })
    }

    /// Fetches current conditions and the bucketed forecast concurrently
    /// and assembles the point's bundle, slicing the forecast list to
    /// [`FORECAST_SLOTS`] entries.
    pub async fn fetch_bundle(&self, point: GeoPoint) -> Result<ForecastBundle, ForecastFetchError> {
        let (current, mut hourly) =
            tokio::try_join!(self.fetch_current(point), self.fetch_forecast(point))?;
        hourly.truncate(FORECAST_SLOTS);
        Ok(ForecastBundle { current, hourly })
    }

    async fn fetch_current(&self, point: GeoPoint) -> Result<ForecastSample, ForecastFetchError> {
        let response: OwReading = self
            .request(&format!("{}/weather", self.base_url), point)
            .await?;
        response.into_sample()
    }

    async fn fetch_forecast(
        &self,
        point: GeoPoint,
    ) -> Result<Vec<ForecastSample>, ForecastFetchError> {
        let response: OwForecastResponse = self
            .request(&format!("{}/forecast", self.base_url), point)
            .await?;
        response
            .list
            .into_iter()
            .map(OwReading::into_sample)
            .collect()
    }

    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        point: GeoPoint,
    ) -> Result<T, ForecastFetchError> {
        Ok(self
            .http
            .get(url)
            .query(&[
                ("lat", point.lat.to_string()),
                ("lon", point.lon.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
}

/// Fixed, clearly-synthetic bundle substituted when a point's provider
/// calls fail: mild, clear, calm. Its empty `hourly` list keeps it out of
/// the cache.
pub fn fallback_bundle() -> ForecastBundle {
    ForecastBundle {
        current: ForecastSample {
            temp_c: 20.0,
            feels_like_c: 20.0,
            humidity_pct: 50.0,
            wind_speed: 5.0,
            wind_deg: 0.0,
            precip_mm: 0.0,
            condition: Condition {
                main: "Clear".to_string(),
                description: "clear sky".to_string(),
            },
            timestamp_unix: Utc::now().timestamp(),
        },
        hourly: Vec::new(),
    }
}

#[derive(Debug, Deserialize)]
struct OwReading {
    dt: i64,
    main: OwMain,
    weather: Vec<OwCondition>,
    #[serde(default)]
    wind: OwWind,
    rain: Option<OwPrecip>,
    snow: Option<OwPrecip>,
}

impl OwReading {
    fn into_sample(self) -> Result<ForecastSample, ForecastFetchError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or(ForecastFetchError::MissingCondition)?;
        Ok(ForecastSample {
            temp_c: self.main.temp,
            feels_like_c: self.main.feels_like,
            humidity_pct: self.main.humidity,
            wind_speed: self.wind.speed,
            wind_deg: self.wind.deg,
            precip_mm: self
                .rain
                .or(self.snow)
                .and_then(|p| p.volume)
                .unwrap_or(0.0),
            condition: Condition {
                main: condition.main,
                description: condition.description,
            },
            timestamp_unix: self.dt,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwReading>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwWind {
    #[serde(default)]
    speed: f64,
    #[serde(default)]
    deg: f64,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    main: String,
    description: String,
}

/// Precipitation volume, keyed `1h` on current readings and `3h` on
/// forecast entries.
#[derive(Debug, Deserialize)]
struct OwPrecip {
    #[serde(rename = "1h", alias = "3h")]
    volume: Option<f64>,
}
