//! Forecast cache: a pure optimization, never part of the correctness
//! path. Implementations must not fail; a broken backing store degrades
//! silently to cache misses.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use shared::{ForecastBundle, GeoPoint};

/// Default entry lifetime; provider data refreshes on the hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Cache key for a queried point, derived from the coordinates exactly as
/// fetched (no rounding).
pub fn cache_key(point: GeoPoint) -> String {
    format!("weather:{}:{}", point.lat, point.lon)
}

/// Injected caching capability. Implementations may back this with any
/// key/value store; both methods are infallible by construction.
pub trait ForecastCache: Send + Sync {
    /// Returns the cached bundle, or `None` on miss, expiry or backing
    /// failure.
    fn get(&self, key: &str) -> Option<ForecastBundle>;

    /// Stores a bundle for `ttl`. Failures are swallowed.
    fn set(&self, key: &str, bundle: ForecastBundle, ttl: Duration);
}

struct Entry {
    bundle: ForecastBundle,
    expires_at: Instant,
}

/// In-process TTL cache. Expired entries are dropped on read.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ForecastCache for MemoryCache {
    fn get(&self, key: &str) -> Option<ForecastBundle> {
        let mut entries = self.entries.lock().ok()?;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.bundle.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn set(&self, key: &str, bundle: ForecastBundle, ttl: Duration) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                key.to_string(),
                Entry {
                    bundle,
                    expires_at: Instant::now() + ttl,
                },
            );
        }
    }
}

/// Stub for environments that run without a cache.
pub struct NoopCache;

impl ForecastCache for NoopCache {
    fn get(&self, _key: &str) -> Option<ForecastBundle> {
        None
    }

    fn set(&self, _key: &str, _bundle: ForecastBundle, _ttl: Duration) {}
}
