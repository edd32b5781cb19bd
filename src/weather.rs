use std::time::Duration;

use serde::Deserialize;

use crate::cache::{CacheKind, SharedCache, WEATHER_DATA};
use crate::config::Config;
use crate::error::{MoonPhaseError, Result};
use crate::location::Location;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherCondition {
    pub id: u32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Wind {
    pub speed: f64,
    /// Direction in degrees.
    pub deg: f64,
}

/// Current conditions in imperial units.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentConditions {
    pub name: String,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    pub main: MainReadings,
    pub wind: Wind,
}

impl CurrentConditions {
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn summary(&self) -> String {
        let description = self
            .weather
            .first()
            .map(|w| w.description.as_str())
            .unwrap_or("no report");
        format!("{}: {:.0}°F, {}", self.name, self.main.temp, description)
    }
}

/// Client for the OpenWeatherMap current-weather API.
#[derive(Clone)]
pub struct WeatherClient {
    endpoint: String,
    api_key: Option<String>,
    timeout: Duration,
    cache: SharedCache,
}

impl WeatherClient {
    pub fn new(config: &Config, cache: SharedCache) -> Self {
        Self {
            endpoint: config.weather_endpoint.clone(),
            api_key: config.weather_api_key.clone(),
            timeout: config.http_timeout,
            cache,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn fetch(&self, location: Location) -> Result<CurrentConditions> {
        let cached = self.cache.write().get(WEATHER_DATA);
        if let Some(body) = cached {
            match CurrentConditions::from_json(&body) {
                Ok(conditions) => return Ok(conditions),
                Err(e) => tracing::warn!(target: "weather", "Discarding cached weather: {}", e),
            }
        }

        let api_key = self.api_key.as_deref().ok_or_else(|| MoonPhaseError::InvalidConfig {
            key: crate::config::ENV_WEATHER_KEY.to_string(),
            value: String::new(),
        })?;

        let body = ureq::get(&self.endpoint)
            .timeout(self.timeout)
            .query("lat", &location.latitude.to_string())
            .query("lon", &location.longitude.to_string())
            .query("units", "imperial")
            .query("appid", api_key)
            .call()?
            .into_string()?;

        let conditions = CurrentConditions::from_json(&body)?;
        self.cache.write().put(WEATHER_DATA, body, CacheKind::Weather);
        tracing::info!(target: "weather", name = %conditions.name, temp = conditions.main.temp, "fetched weather");
        Ok(conditions)
    }
}
