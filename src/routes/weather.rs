//! Weather HTTP endpoint.
//!
//! - GET /weather?lat=&lon=&units=&lang=&exclude=

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;

use crate::errors::{AppError, ErrorResponse};
use crate::models::WeatherResponse;
use crate::routes::AppState;
use crate::services::params::{resolve, ValidationError, WeatherQuery};

/// Get current weather and a 7-day forecast.
///
/// Any parameter left out falls back to the server's configured default
/// location, unit system and language.
#[utoipa::path(
    get,
    path = "/weather",
    tag = "Weather",
    params(WeatherQuery),
    responses(
        (status = 200, description = "Current weather and daily forecast", body = WeatherResponse),
        (status = 400, description = "Malformed query string, invalid coordinates or units, or request rejected by OpenWeather", body = ErrorResponse),
        (status = 401, description = "OpenWeather rejected the configured API key", body = ErrorResponse),
        (status = 404, description = "Location not found", body = ErrorResponse),
        (status = 429, description = "OpenWeather rate limit exceeded", body = ErrorResponse),
        (status = 500, description = "OpenWeather unreachable or failing", body = ErrorResponse),
    )
)]
pub async fn get_weather(
    State(state): State<AppState>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Json<WeatherResponse>, AppError> {
    let Query(query) =
        query.map_err(|rejection| ValidationError::MalformedQuery(rejection.body_text()))?;
    let params = resolve(&query, &state.defaults)?;
    let response = state.openweather.fetch(&params).await?;
    Ok(Json(response))
}
