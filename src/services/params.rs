//! Query parameter resolution.
//!
//! Merges the raw `GET /weather` query with the configured defaults and
//! validates the result. Pure: no I/O, no logging.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::config::WeatherDefaults;
use crate::models::Units;

/// Raw query string of `GET /weather`. Every field is optional text; typing
/// and validation happen in [`resolve`].
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WeatherQuery {
    /// Latitude, -90 to 90 (e.g. "-23.2927")
    pub lat: Option<String>,
    /// Longitude, -180 to 180 (e.g. "-51.1732")
    pub lon: Option<String>,
    /// Unit system: "standard" (Kelvin), "metric" (Celsius) or "imperial" (Fahrenheit)
    pub units: Option<String>,
    /// Language for condition descriptions (e.g. "pt_br", "en", "de")
    pub lang: Option<String>,
    /// Comma-separated sections to leave out: current, minutely, hourly, daily, alerts
    pub exclude: Option<String>,
}

/// A fully-populated, validated weather query.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParameters {
    pub latitude: f64,
    pub longitude: f64,
    pub units: Units,
    pub language: String,
    /// Sections to exclude upstream; empty means the parameter is not sent.
    pub exclude: Vec<String>,
}

impl ResolvedParameters {
    /// The `exclude` value to send upstream, `None` when nothing is excluded.
    pub fn exclude_param(&self) -> Option<String> {
        if self.exclude.is_empty() {
            None
        } else {
            Some(self.exclude.join(","))
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid latitude or longitude")]
    InvalidCoordinate,

    #[error("Latitude must be between -90 and 90")]
    LatitudeOutOfRange,

    #[error("Longitude must be between -180 and 180")]
    LongitudeOutOfRange,

    #[error("units must be one of: standard, metric, imperial")]
    InvalidUnits,

    /// The query string itself could not be decoded (e.g. a repeated key).
    #[error("{0}")]
    MalformedQuery(String),
}

/// Resolve a raw query against the defaults.
///
/// Checks run in a fixed order and the first failure wins: coordinates must
/// be finite numbers, then latitude range, then longitude range, then units.
pub fn resolve(
    raw: &WeatherQuery,
    defaults: &WeatherDefaults,
) -> Result<ResolvedParameters, ValidationError> {
    let latitude = parse_coordinate(raw.lat.as_deref(), defaults.latitude)?;
    let longitude = parse_coordinate(raw.lon.as_deref(), defaults.longitude)?;

    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ValidationError::LatitudeOutOfRange);
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ValidationError::LongitudeOutOfRange);
    }

    // Blank falls back to the default, anything else must match exactly
    let units = match raw.units.as_deref().filter(|u| !u.trim().is_empty()) {
        Some(u) => u.parse::<Units>().map_err(|_| ValidationError::InvalidUnits)?,
        None => defaults.units,
    };

    let language = present(raw.lang.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| defaults.language.clone());

    Ok(ResolvedParameters {
        latitude,
        longitude,
        units,
        language,
        exclude: normalize_exclude(raw.exclude.as_deref()),
    })
}

/// Split a comma-separated exclude list, dropping empty segments.
pub fn normalize_exclude(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Blank query values (`?lat=`) count as absent.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_coordinate(raw: Option<&str>, default: f64) -> Result<f64, ValidationError> {
    let value = match present(raw) {
        Some(text) => text
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidCoordinate)?,
        None => default,
    };
    // "NaN" and "inf" parse as f64 but are not coordinates
    if !value.is_finite() {
        return Err(ValidationError::InvalidCoordinate);
    }
    Ok(value)
}
