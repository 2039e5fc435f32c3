//! Batch weather acquisition for a set of sampled route points.
//!
//! Each point resolves independently and concurrently. One point's
//! failure substitutes the fallback bundle for that point alone; the
//! batch as a whole always yields one bundle per requested point.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use shared::{ForecastBundle, GeoPoint, PointForecast};

use crate::cache::{cache_key, ForecastCache, DEFAULT_TTL};
use crate::weather::{fallback_bundle, OpenWeatherClient};

pub struct ForecastService {
    client: OpenWeatherClient,
    cache: Arc<dyn ForecastCache>,
    cache_ttl: Duration,
}

impl ForecastService {
    pub fn new(client: OpenWeatherClient, cache: Arc<dyn ForecastCache>) -> Self {
        Self {
            client,
            cache,
            cache_ttl: DEFAULT_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Resolves one bundle per requested point, in request order.
    ///
    /// Never fails as a whole: points whose provider calls error out carry
    /// the fallback bundle instead.
    pub async fn forecasts_for(
        &self,
        points: &[GeoPoint],
        bypass_cache: bool,
    ) -> Vec<PointForecast> {
        let tasks = points.iter().map(|&point| async move {
            PointForecast {
                point,
                forecast: self.bundle_for(point, bypass_cache).await,
            }
        });
        join_all(tasks).await
    }

    async fn bundle_for(&self, point: GeoPoint, bypass_cache: bool) -> ForecastBundle {
        let key = cache_key(point);

        if !bypass_cache {
            if let Some(bundle) = self.cache.get(&key) {
                // A bundle without forecast slots cannot answer
                // arrival-time queries; treat it as a miss.
                if !bundle.hourly.is_empty() {
                    return bundle;
                }
            }
        }

        match self.client.fetch_bundle(point).await {
            Ok(bundle) => {
                if !bundle.hourly.is_empty() {
                    self.cache.set(&key, bundle.clone(), self.cache_ttl);
                }
                bundle
            }
            Err(err) => {
                tracing::warn!(
                    lat = point.lat,
                    lon = point.lon,
                    "weather fetch failed, using fallback: {err}"
                );
                fallback_bundle()
            }
        }
    }
}
