//! Route sampling: reduces a dense decoded path to the sparse set of
//! points worth querying weather for.

use shared::GeoPoint;

/// Hard upper bound on sampled points per route. The weather provider is
/// rate- and latency-sensitive, so this cap is never exceeded.
pub const MAX_WEATHER_POINTS: usize = 50;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters.
pub fn haversine_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Sampling interval for a route of the given total length. Longer routes
/// get coarser spacing so marker counts stay flat.
pub fn sampling_interval_m(route_distance_m: f64) -> f64 {
    let km = route_distance_m / 1000.0;
    if km > 500.0 {
        30_000.0
    } else if km > 200.0 {
        20_000.0
    } else if km > 50.0 {
        10_000.0
    } else {
        5_000.0
    }
}

/// Two-stage reduction of a dense route path: distance-interval sampling,
/// then decimation to the hard cap.
pub fn sample_route(points: &[GeoPoint], route_distance_m: f64) -> Vec<GeoPoint> {
    let sampled = sample_by_distance(points, sampling_interval_m(route_distance_m));
    decimate(sampled, MAX_WEATHER_POINTS)
}

/// Walks the path accumulating segment lengths and emits a point each time
/// the accumulator reaches the interval, resetting it on emit. First and
/// last points are always kept.
fn sample_by_distance(points: &[GeoPoint], interval_m: f64) -> Vec<GeoPoint> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };

    let mut sampled = vec![first];
    let mut last_emitted = 0usize;
    let mut accumulated = 0.0;

    for i in 1..points.len() {
        accumulated += haversine_m(points[i - 1], points[i]);
        if accumulated >= interval_m {
            sampled.push(points[i]);
            last_emitted = i;
            accumulated = 0.0;
        }
    }

    if last_emitted != points.len() - 1 {
        sampled.push(points[points.len() - 1]);
    }

    sampled
}

/// Evenly decimates down to the cap. `step` is chosen so that every
/// step-th index plus the forced last index can never exceed `cap`.
fn decimate(points: Vec<GeoPoint>, cap: usize) -> Vec<GeoPoint> {
    if points.len() <= cap || cap < 2 {
        return points;
    }

    let step = points.len().div_ceil(cap - 1);
    let last = points.len() - 1;
    points
        .into_iter()
        .enumerate()
        .filter(|(i, _)| *i == 0 || *i == last || *i % step == 0)
        .map(|(_, p)| p)
        .collect()
}
