//! OpenWeather One Call 3.0 client.
//!
//! Fetches current weather and the daily forecast for one location and
//! reduces the payload to [`WeatherResponse`].
//! See: https://openweathermap.org/api/one-call-3

use reqwest::StatusCode;
use serde::Deserialize;

use crate::models::{
    CurrentWeather, DailyForecast, TemperatureRange, WeatherCondition, WeatherResponse,
};
use crate::services::params::ResolvedParameters;

/// Number of forecast days kept in the public response.
const DAILY_FORECAST_DAYS: usize = 7;
/// Used when an upstream error body carries no `message`.
const UNKNOWN_UPSTREAM_MESSAGE: &str = "Unknown error";

/// Client for the OpenWeather One Call API.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

/// Classified failure of an upstream call.
///
/// The `Display` text is safe to show to API callers. Transport and internal
/// failures keep their details for logging only.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Invalid request: {0}")]
    InvalidUpstreamRequest(String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Location not found")]
    LocationNotFound,

    #[error("API rate limit exceeded")]
    RateLimitExceeded,

    #[error("Weather service error: {message}")]
    UpstreamServiceError { status: u16, message: String },

    #[error("Unable to connect to weather service")]
    UpstreamUnreachable(String),

    #[error("Internal server error")]
    InternalError(String),
}

// --- OpenWeather JSON response types ---

#[derive(Debug, Deserialize)]
struct OneCallResponse {
    lat: f64,
    lon: f64,
    timezone: String,
    /// Absent when the caller excluded `current`.
    current: Option<OneCallCurrent>,
    /// Absent when the caller excluded `daily`.
    #[serde(default)]
    daily: Vec<OneCallDaily>,
}

#[derive(Debug, Deserialize)]
struct OneCallCurrent {
    temp: f64,
    feels_like: f64,
    humidity: i64,
    pressure: i64,
    wind_speed: f64,
    #[serde(default)]
    weather: Vec<WeatherCondition>,
}

#[derive(Debug, Deserialize)]
struct OneCallDaily {
    dt: i64,
    temp: OneCallDailyTemp,
    #[serde(default)]
    weather: Vec<WeatherCondition>,
}

#[derive(Debug, Deserialize)]
struct OneCallDailyTemp {
    min: f64,
    max: f64,
}

impl OpenWeatherClient {
    pub fn new(api_key: &str, base_url: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;
        Ok(Self::with_client(client, api_key, base_url))
    }

    /// Wrap an already configured `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, api_key: &str, base_url: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
        }
    }

    /// Fetch current weather and the daily forecast for resolved parameters.
    ///
    /// Issues exactly one request. Failures are classified and logged here,
    /// callers only see the [`GatewayError`].
    pub async fn fetch(&self, params: &ResolvedParameters) -> Result<WeatherResponse, GatewayError> {
        tracing::debug!(
            "Fetching weather data for coordinates: {}, {}",
            params.latitude,
            params.longitude
        );

        let mut query: Vec<(&str, String)> = vec![
            ("lat", params.latitude.to_string()),
            ("lon", params.longitude.to_string()),
            ("appid", self.api_key.clone()),
            ("units", params.units.as_str().to_string()),
            ("lang", params.language.clone()),
        ];
        // An empty exclude is not the same as none upstream, so never send one
        if let Some(exclude) = params.exclude_param() {
            query.push(("exclude", exclude));
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                let err = classify_transport(&e);
                tracing::error!("OpenWeather request failed: {}", e);
                err
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = upstream_message(&body);
            tracing::error!(
                status = status.as_u16(),
                "OpenWeather API error: {} - {}",
                status.as_u16(),
                message
            );
            return Err(classify_status(status, message));
        }

        // Losing the connection mid-body is a transport failure, a body that
        // arrives intact but does not decode is not
        let body = response.bytes().await.map_err(|e| {
            tracing::error!("OpenWeather response body read failed: {}", e);
            GatewayError::UpstreamUnreachable(e.to_string())
        })?;
        let payload: OneCallResponse = serde_json::from_slice(&body).map_err(|e| {
            tracing::error!("OpenWeather JSON parse error: {}", e);
            GatewayError::InternalError(format!("OpenWeather JSON parse error: {}", e))
        })?;

        Ok(transform(payload))
    }
}

/// Map a non-success upstream status to a [`GatewayError`].
pub fn classify_status(status: StatusCode, message: String) -> GatewayError {
    match status {
        StatusCode::BAD_REQUEST => GatewayError::InvalidUpstreamRequest(message),
        StatusCode::UNAUTHORIZED => GatewayError::InvalidApiKey,
        StatusCode::NOT_FOUND => GatewayError::LocationNotFound,
        StatusCode::TOO_MANY_REQUESTS => GatewayError::RateLimitExceeded,
        other => GatewayError::UpstreamServiceError {
            status: other.as_u16(),
            message,
        },
    }
}

/// Map a reqwest failure that produced no HTTP response.
fn classify_transport(err: &reqwest::Error) -> GatewayError {
    // DNS failures and refused connections both surface as connect errors
    if err.is_connect() || err.is_timeout() {
        GatewayError::UpstreamUnreachable(err.to_string())
    } else {
        GatewayError::InternalError(err.to_string())
    }
}

/// Extract `message` from an OpenWeather error body (`{"cod":401,"message":"..."}`).
fn upstream_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| UNKNOWN_UPSTREAM_MESSAGE.to_string())
}

/// Project the One Call payload onto the public response shape.
fn transform(payload: OneCallResponse) -> WeatherResponse {
    WeatherResponse {
        lat: payload.lat,
        lon: payload.lon,
        timezone: payload.timezone,
        current: payload.current.map(|c| CurrentWeather {
            temp: c.temp,
            feels_like: c.feels_like,
            humidity: c.humidity,
            pressure: c.pressure,
            wind_speed: c.wind_speed,
            weather: c.weather,
        }),
        daily: payload
            .daily
            .into_iter()
            .take(DAILY_FORECAST_DAYS)
            .map(|day| DailyForecast {
                dt: day.dt,
                temp: TemperatureRange {
                    min: day.temp.min,
                    max: day.temp.max,
                },
                weather: day.weather,
            })
            .collect(),
    }
}
