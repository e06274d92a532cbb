//! Public response shape served by `GET /weather`.
//!
//! These types are a strict subset of the OpenWeather one-call payload:
//! the gateway copies values across verbatim and drops everything else.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Unit system for temperatures and wind speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Kelvin, m/s
    Standard,
    /// Celsius, m/s
    Metric,
    /// Fahrenheit, mph
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Standard => "standard",
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown unit system '{0}'")]
pub struct UnknownUnits(pub String);

impl FromStr for Units {
    type Err = UnknownUnits;

    /// Exact, lowercase match only (the upstream API is case-sensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Units::Standard),
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            other => Err(UnknownUnits(other.to_string())),
        }
    }
}

/// A weather condition as reported by OpenWeather, passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeatherCondition {
    /// OpenWeather condition id (e.g. 800 for clear sky)
    pub id: i64,
    /// Condition group (e.g. "Clear", "Rain")
    pub main: String,
    /// Localised description (e.g. "céu limpo")
    pub description: String,
    /// Icon code (e.g. "01d")
    pub icon: String,
}

/// Current conditions at the requested location.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CurrentWeather {
    /// Temperature in the requested unit system
    pub temp: f64,
    /// Perceived temperature in the requested unit system
    pub feels_like: f64,
    /// Relative humidity percentage
    pub humidity: i64,
    /// Sea-level atmospheric pressure in hPa
    pub pressure: i64,
    /// Wind speed (m/s for standard/metric, mph for imperial)
    pub wind_speed: f64,
    pub weather: Vec<WeatherCondition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

/// One day of the forecast.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DailyForecast {
    /// Unix timestamp (UTC) of the forecasted day
    pub dt: i64,
    pub temp: TemperatureRange,
    pub weather: Vec<WeatherCondition>,
}

/// Current weather plus up to seven days of forecast.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct WeatherResponse {
    /// Latitude echoed by the provider
    pub lat: f64,
    /// Longitude echoed by the provider
    pub lon: f64,
    /// IANA timezone of the location (e.g. "America/Sao_Paulo")
    pub timezone: String,
    /// Current conditions. Omitted when `exclude` contains `current`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<CurrentWeather>,
    /// At most the first 7 forecast days. Empty when `exclude` contains `daily`.
    pub daily: Vec<DailyForecast>,
}
