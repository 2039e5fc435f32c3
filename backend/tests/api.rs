mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use backend::{
    cache::MemoryCache, create_router, directions::DirectionsClient, fetcher::ForecastService,
    weather::OpenWeatherClient, AppState,
};
use hyper::StatusCode;
use shared::{GeoPoint, PointForecast, RouteResponse};
use tower::ServiceExt;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_app(mapbox_url: &str, weather_url: &str) -> axum::Router {
    let directions =
        DirectionsClient::with_base_url(mapbox_url.to_string(), "test-token".to_string())
            .expect("directions client");
    let weather = OpenWeatherClient::with_base_url(weather_url.to_string(), "test-key".to_string())
        .expect("weather client");
    let forecasts = ForecastService::new(weather, Arc::new(MemoryCache::new()));
    create_router(AppState {
        directions,
        forecasts: Arc::new(forecasts),
    })
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn directions_returns_a_sampled_route() {
    let mapbox = MockServer::start().await;
    let weather = MockServer::start().await;

    let points = common::northbound_line(240, 0.5);
    let geometry = common::encode_polyline(&points);
    Mock::given(method("GET"))
        .and(path_regex("^/directions/v5/mapbox/driving/.*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "routes": [{ "geometry": geometry, "distance": 120_000.0, "duration": 7200.0 }]
        })))
        .mount(&mapbox)
        .await;

    let app = test_app(&mapbox.uri(), &weather.uri());
    let (status, body) = get(app, "/api/directions?origin=5.0,45.0&destination=5.1,46.1").await;

    assert_eq!(status, StatusCode::OK);
    let route: RouteResponse = serde_json::from_slice(&body).expect("route payload");
    assert_eq!(route.distance_meters, 120_000.0);
    assert_eq!(route.duration_seconds, 7200.0);
    assert_eq!(route.geometry, geometry);

    // 50-200 km bucket: one point every 10 km plus endpoints.
    assert!(route.coordinates.len() <= 13);
    let first = route.coordinates.first().expect("non-empty route");
    let last = route.coordinates.last().expect("non-empty route");
    assert!((first.lat - points[0].lat).abs() < 1e-5);
    assert!((last.lat - points[points.len() - 1].lat).abs() < 1e-5);
}

#[tokio::test]
async fn directions_surfaces_no_route_as_not_found() {
    let mapbox = MockServer::start().await;
    let weather = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex("^/directions/v5/mapbox/driving/.*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "routes": [] })))
        .mount(&mapbox)
        .await;

    let app = test_app(&mapbox.uri(), &weather.uri());
    let (status, _) = get(app, "/api/directions?origin=5.0,45.0&destination=5.1,46.1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn directions_rejects_malformed_origins() {
    let mapbox = MockServer::start().await;
    let weather = MockServer::start().await;

    let app = test_app(&mapbox.uri(), &weather.uri());
    let (status, _) = get(app, "/api/directions?origin=nowhere&destination=5.1,46.1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn weather_returns_one_bundle_per_point_in_order() {
    let mapbox = MockServer::start().await;
    let weather = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::current_json(10.0)))
        .mount(&weather)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::forecast_json(8)))
        .mount(&weather)
        .await;

    let points = vec![
        GeoPoint { lat: 45.0, lon: 5.0 },
        GeoPoint { lat: 45.5, lon: 5.2 },
        GeoPoint { lat: 46.0, lon: 5.4 },
    ];
    let coordinates = common::urlencode(&serde_json::to_string(&points).expect("encode points"));

    let app = test_app(&mapbox.uri(), &weather.uri());
    let (status, body) = get(app, &format!("/api/weather?coordinates={coordinates}")).await;

    assert_eq!(status, StatusCode::OK);
    let forecasts: Vec<PointForecast> = serde_json::from_slice(&body).expect("weather payload");
    assert_eq!(forecasts.len(), points.len());
    for (forecast, point) in forecasts.iter().zip(&points) {
        assert_eq!(forecast.point, *point);
        assert_eq!(forecast.forecast.current.temp_c, 10.0);
        assert_eq!(forecast.forecast.hourly.len(), 8);
        assert_eq!(forecast.forecast.hourly[0].temp_c, 1.0);
    }
}

#[tokio::test]
async fn weather_rejects_oversized_batches() {
    let mapbox = MockServer::start().await;
    let weather = MockServer::start().await;

    let points: Vec<GeoPoint> = (0..51)
        .map(|i| GeoPoint {
            lat: 45.0 + i as f64 * 0.01,
            lon: 5.0,
        })
        .collect();
    let coordinates = common::urlencode(&serde_json::to_string(&points).expect("encode points"));

    let app = test_app(&mapbox.uri(), &weather.uri());
    let (status, _) = get(app, &format!("/api/weather?coordinates={coordinates}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn weather_rejects_unparseable_coordinates() {
    let mapbox = MockServer::start().await;
    let weather = MockServer::start().await;

    let app = test_app(&mapbox.uri(), &weather.uri());
    let (status, _) = get(app, "/api/weather?coordinates=not-json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_endpoint_answers() {
    let mapbox = MockServer::start().await;
    let weather = MockServer::start().await;

    let app = test_app(&mapbox.uri(), &weather.uri());
    let (status, body) = get(app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    let payload: serde_json::Value = serde_json::from_slice(&body).expect("health payload");
    assert_eq!(payload["status"], "ok");
}
