//! Synchronizes route progress with time-indexed forecast data: arrival
//! estimates, forecast-slot resolution and marker thinning.

use chrono::{DateTime, Duration, Utc};
use shared::{ForecastBundle, ForecastSample, GeoPoint};

use crate::models::{ArrivalEstimate, WeatherMarker};

/// Width of one provider forecast slot in hours. The `hourly` array is
/// coarse, not truly hourly.
const FORECAST_STEP_HOURS: f64 = 3.0;

/// Markers aim for this spacing along the travel timeline.
const MARKER_SPACING_MIN: f64 = 30.0;
/// Accepted deviation from an exact spacing multiple.
const MARKER_TOLERANCE_MIN: f64 = 5.0;
/// Minimum elapsed gap between two kept markers.
const MARKER_MIN_GAP_MIN: f64 = 25.0;

/// Projects arrival times over the sampled route assuming uniform travel
/// speed along the polyline. `departure_offset_minutes` shifts the whole
/// trip relative to `now`.
pub fn estimate_arrivals(
    point_count: usize,
    duration_seconds: f64,
    departure_offset_minutes: f64,
    now: DateTime<Utc>,
) -> Vec<ArrivalEstimate> {
    let duration_minutes = duration_seconds / 60.0;

    (0..point_count)
        .map(|index| {
            let progress = if point_count > 1 {
                index as f64 / (point_count - 1) as f64
            } else {
                0.0
            };
            let elapsed_minutes = progress * duration_minutes;
            let minutes_from_now = departure_offset_minutes + elapsed_minutes;
            ArrivalEstimate {
                route_point_index: index,
                arrival_time: now + Duration::seconds((minutes_from_now * 60.0).round() as i64),
                hours_from_now: minutes_from_now / 60.0,
                elapsed_minutes,
            }
        })
        .collect()
}

/// Applies a "what if I left N hours later" preview shift uniformly to
/// every estimate, without recomputing progress or refetching anything.
pub fn shift_preview(estimates: &mut [ArrivalEstimate], preview_hours: f64) {
    for estimate in estimates {
        estimate.hours_from_now += preview_hours;
        estimate.arrival_time =
            estimate.arrival_time + Duration::seconds((preview_hours * 3600.0).round() as i64);
    }
}

/// Picks the forecast slot covering an arrival time.
///
/// Arrivals under an hour out (or in the past) use current conditions.
/// Beyond that, slot `floor((h - 1) / 3)` covers the 1-3h window, then the
/// 4-6h window, and so on. Arrivals past the forecast horizon reuse the
/// last slot rather than failing; a bundle without slots falls back to
/// current conditions.
pub fn resolve_sample<'a>(
    bundle: &'a ForecastBundle,
    estimate: &ArrivalEstimate,
) -> &'a ForecastSample {
    let hours = estimate.hours_from_now;
    if hours < 1.0 {
        return &bundle.current;
    }

    let index = ((hours - 1.0) / FORECAST_STEP_HOURS).floor().max(0.0) as usize;
    match bundle.hourly.get(index) {
        Some(sample) => sample,
        None => bundle.hourly.last().unwrap_or(&bundle.current),
    }
}

/// Builds the display-ready marker sequence for a route: one candidate per
/// sampled point, resolved against its arrival estimate, then thinned to
/// display density.
pub fn build_markers(
    points: &[GeoPoint],
    bundles: &[ForecastBundle],
    estimates: &[ArrivalEstimate],
) -> Vec<WeatherMarker> {
    let candidates = points
        .iter()
        .zip(bundles)
        .zip(estimates)
        .map(|((&point, bundle), estimate)| WeatherMarker {
            point,
            sample: resolve_sample(bundle, estimate).clone(),
            arrival_time: estimate.arrival_time,
            elapsed_minutes: estimate.elapsed_minutes,
        })
        .collect();
    filter_markers(candidates)
}

/// Thins markers to roughly one per half hour of travel. Endpoints always
/// survive; an interior marker survives when it sits near a 30-minute
/// multiple and far enough past the previous survivor.
pub fn filter_markers(markers: Vec<WeatherMarker>) -> Vec<WeatherMarker> {
    if markers.len() <= 2 {
        return markers;
    }

    let last_index = markers.len() - 1;
    let mut kept = Vec::new();
    let mut last_elapsed = 0.0;

    for (i, marker) in markers.into_iter().enumerate() {
        let keep = if i == 0 || i == last_index {
            true
        } else {
            let offset = marker.elapsed_minutes % MARKER_SPACING_MIN;
            let near_multiple = offset <= MARKER_TOLERANCE_MIN
                || offset >= MARKER_SPACING_MIN - MARKER_TOLERANCE_MIN;
            near_multiple && marker.elapsed_minutes - last_elapsed >= MARKER_MIN_GAP_MIN
        };
        if keep {
            last_elapsed = marker.elapsed_minutes;
            kept.push(marker);
        }
    }

    kept
}
