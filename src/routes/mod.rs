use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::config::WeatherDefaults;
use crate::services::openweather::OpenWeatherClient;

pub mod health;
pub mod weather;

/// Shared, read-only state for the weather endpoint.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) defaults: Arc<WeatherDefaults>,
    pub(crate) openweather: OpenWeatherClient,
}

/// API routes without documentation or middleware layers.
pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/weather", get(weather::get_weather))
        .with_state(state)
        .route("/health", get(health::health_check))
}
