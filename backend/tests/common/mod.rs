#![allow(dead_code)]
//! Shared fixtures for integration tests.

use serde_json::{json, Value};
use shared::GeoPoint;

// One kilometer north is just over 0.009 degrees of latitude.
const KM_LAT: f64 = 0.009;

/// A line of `count` points heading north, `spacing_km` apart.
pub fn northbound_line(count: usize, spacing_km: f64) -> Vec<GeoPoint> {
    (0..count)
        .map(|i| GeoPoint {
            lat: 45.0 + i as f64 * spacing_km * KM_LAT,
            lon: 5.0,
        })
        .collect()
}

/// Encodes points the way the routing provider does (polyline6).
pub fn encode_polyline(points: &[GeoPoint]) -> String {
    let mut out = String::new();
    let mut prev = (0i64, 0i64);
    for point in points {
        let lat_i = (point.lat * 1e6).round() as i64;
        let lon_i = (point.lon * 1e6).round() as i64;
        write_delta(&mut out, lat_i - prev.0);
        write_delta(&mut out, lon_i - prev.1);
        prev = (lat_i, lon_i);
    }
    out
}

fn write_delta(out: &mut String, delta: i64) {
    let mut value = if delta < 0 { !(delta << 1) } else { delta << 1 } as u64;
    loop {
        let mut chunk = (value & 0x1f) as u8;
        value >>= 5;
        if value != 0 {
            chunk |= 0x20;
        }
        out.push((chunk + 63) as char);
        if value == 0 {
            break;
        }
    }
}

/// Percent-encodes a query parameter value.
pub fn urlencode(raw: &str) -> String {
    raw.bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}

/// Weather-provider payload for current conditions.
pub fn current_json(temp_c: f64) -> Value {
    json!({
        "dt": 1_700_000_000,
        "main": { "temp": temp_c, "feels_like": temp_c, "humidity": 60 },
        "weather": [{ "main": "Clouds", "description": "scattered clouds" }],
        "wind": { "speed": 3.0, "deg": 200 }
    })
}

/// Weather-provider payload for the 3-hourly forecast with `slots`
/// entries; slot `i` reports a temperature of `i + 1`.
pub fn forecast_json(slots: usize) -> Value {
    let list: Vec<Value> = (0..slots)
        .map(|i| {
            json!({
                "dt": 1_700_000_000 + (i as i64 + 1) * 10_800,
                "main": { "temp": (i + 1) as f64, "feels_like": (i + 1) as f64, "humidity": 60 },
                "weather": [{ "main": "Clouds", "description": "scattered clouds" }],
                "wind": { "speed": 3.0, "deg": 200 }
            })
        })
        .collect();
    json!({ "list": list })
}
