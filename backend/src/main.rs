use std::{net::SocketAddr, sync::Arc};

use backend::{
    cache::MemoryCache, config::AppConfig, create_router, directions::DirectionsClient,
    fetcher::ForecastService, weather::OpenWeatherClient, AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().expect("load configuration");

    let directions =
        DirectionsClient::new(config.mapbox_token.clone()).expect("build directions client");
    let weather =
        OpenWeatherClient::new(config.openweather_key.clone()).expect("build weather client");
    let forecasts = ForecastService::new(weather, Arc::new(MemoryCache::new()))
        .with_ttl(config.cache_ttl);

    let state = AppState {
        directions,
        forecasts: Arc::new(forecasts),
    };
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("starting backend on http://{addr}");
    axum::serve(tokio::net::TcpListener::bind(addr).await.unwrap(), app)
        .await
        .unwrap();
}
