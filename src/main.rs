// OpenWeather Gateway v0.1
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod errors;
mod models;
mod routes;
mod services;

use config::AppConfig;
use routes::AppState;
use services::openweather::OpenWeatherClient;

/// OpenWeather Gateway — OpenAPI specification.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "OpenWeather Gateway",
        version = "0.1.0",
        description = "Current weather and a 7-day forecast for a location, \
            backed by the OpenWeather One Call API. Missing query parameters \
            fall back to the server's configured default location, units and language.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Weather", description = "Current weather and daily forecast"),
    ),
    paths(
        routes::health::health_check,
        routes::weather::get_weather,
    ),
    components(
        schemas(
            routes::health::HealthResponse,
            models::Units,
            models::WeatherCondition,
            models::CurrentWeather,
            models::TemperatureRange,
            models::DailyForecast,
            models::WeatherResponse,
            errors::ErrorResponse,
        )
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // A missing API key is fatal: never start serving without one
    let config = AppConfig::from_env().expect("Invalid configuration");

    init_tracing(config.json_logs);

    let openweather =
        OpenWeatherClient::new(&config.openweather_api_key, &config.openweather_base_url)
            .expect("Failed to build HTTP client");

    let state = AppState {
        defaults: Arc::new(config.defaults.clone()),
        openweather,
    };

    tracing::info!(
        "Default location {}, {} ({}, lang={})",
        config.defaults.latitude,
        config.defaults.longitude,
        config.defaults.units,
        config.defaults.language
    );

    // Read-only API, restrict methods to GET
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET])
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::router(state))
        .merge(SwaggerUi::new("/api/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("API server listening on {}", addr);
    tracing::info!(
        "Swagger UI available at http://localhost:{}/api/docs/",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "openweather_gateway=debug,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}
