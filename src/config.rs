use std::time::Duration;

use crate::error::{MoonPhaseError, Result};
use crate::location::Location;

pub const SUN_TIMES_ENDPOINT: &str = "https://api.sunrise-sunset.org/json";
pub const WEATHER_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

// Environment variables read by `Config::from_env`
pub const ENV_LATITUDE: &str = "MOONPHASE_LATITUDE";
pub const ENV_LONGITUDE: &str = "MOONPHASE_LONGITUDE";
pub const ENV_OFFLINE: &str = "MOONPHASE_OFFLINE";
pub const ENV_CANVAS_SIZE: &str = "MOONPHASE_CANVAS_SIZE";
pub const ENV_WEATHER_KEY: &str = "OPENWEATHER_API_KEY";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub location: Option<Location>,
    /// Serve sun times from the bundled fixture instead of the network.
    pub offline: bool,
    pub sun_times_endpoint: String,
    pub weather_endpoint: String,
    pub weather_api_key: Option<String>,
    /// Width and height of the moon canvas in points.
    pub canvas_size: f32,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            location: None,
            offline: false,
            sun_times_endpoint: SUN_TIMES_ENDPOINT.to_string(),
            weather_endpoint: WEATHER_ENDPOINT.to_string(),
            weather_api_key: None,
            canvas_size: 200.0,
            http_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with whatever `lookup` returns for each known key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        let latitude = lookup(ENV_LATITUDE).map(|v| parse_f64(ENV_LATITUDE, &v)).transpose()?;
        let longitude = lookup(ENV_LONGITUDE).map(|v| parse_f64(ENV_LONGITUDE, &v)).transpose()?;
        config.location = match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(Location { latitude, longitude }),
            (None, None) => None,
            (Some(_), None) => return Err(invalid(ENV_LONGITUDE, "")),
            (None, Some(_)) => return Err(invalid(ENV_LATITUDE, "")),
        };
        if let Some(location) = config.location {
            if !(-90.0..=90.0).contains(&location.latitude) {
                return Err(invalid(ENV_LATITUDE, &location.latitude.to_string()));
            }
            if !(-180.0..=180.0).contains(&location.longitude) {
                return Err(invalid(ENV_LONGITUDE, &location.longitude.to_string()));
            }
        }

        if let Some(value) = lookup(ENV_OFFLINE) {
            config.offline = parse_bool(ENV_OFFLINE, &value)?;
        }

        if let Some(value) = lookup(ENV_CANVAS_SIZE) {
            let size = value
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|size| *size > 0.0)
                .ok_or_else(|| invalid(ENV_CANVAS_SIZE, &value))?;
            config.canvas_size = size;
        }

        config.weather_api_key = lookup(ENV_WEATHER_KEY).filter(|key| !key.trim().is_empty());

        Ok(config)
    }
}

fn invalid(key: &str, value: &str) -> MoonPhaseError {
    MoonPhaseError::InvalidConfig {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_f64(key: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(key, value))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}
