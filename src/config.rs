use crate::models::Units;

/// OpenWeather one-call 3.0 endpoint.
pub const DEFAULT_OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";

/// Londrina, Brazil.
const DEFAULT_LAT: f64 = -23.2927;
const DEFAULT_LON: f64 = -51.1732;
const DEFAULT_LANG: &str = "pt";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("OPENWEATHER_API_KEY is required")]
    MissingApiKey,

    #[error("{name} has an invalid value '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

/// Values applied to a weather query when the caller leaves a field out.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherDefaults {
    pub latitude: f64,
    pub longitude: f64,
    pub units: Units,
    pub language: String,
}

/// Application configuration, parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openweather_api_key: String,
    pub openweather_base_url: String,
    pub defaults: WeatherDefaults,
    pub port: u16,
    /// Emit JSON log lines instead of human-readable text.
    pub json_logs: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Blank values are treated like unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let openweather_api_key = var("OPENWEATHER_API_KEY").ok_or(ConfigError::MissingApiKey)?;

        let latitude = parse_or("DEFAULT_LAT", var("DEFAULT_LAT"), DEFAULT_LAT)?;
        let longitude = parse_or("DEFAULT_LON", var("DEFAULT_LON"), DEFAULT_LON)?;
        let units = parse_or("DEFAULT_UNITS", var("DEFAULT_UNITS"), Units::Metric)?;
        let port = parse_or("PORT", var("PORT"), DEFAULT_PORT)?;

        Ok(Self {
            openweather_api_key,
            openweather_base_url: var("OPENWEATHER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENWEATHER_URL.to_string()),
            defaults: WeatherDefaults {
                latitude,
                longitude,
                units,
                language: var("DEFAULT_LANG").unwrap_or_else(|| DEFAULT_LANG.to_string()),
            },
            port,
            json_logs: var("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json")),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    let Some(value) = raw else {
        return Ok(default);
    };
    let parsed = value.trim().parse::<T>();
    match parsed {
        Ok(parsed) => Ok(parsed),
        Err(_) => Err(ConfigError::InvalidValue { name, value }),
    }
}
