use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::cache::{sun_key, CacheKind, SharedCache};
use crate::config::Config;
use crate::day_period::SunEvents;
use crate::error::{MoonPhaseError, Result};
use crate::format;
use crate::instant::ObservationInstant;
use crate::location::Location;

/// Response served in offline mode.
pub const FIXTURE: &str = include_str!("../fixtures/sunrise-sunset.json");

#[derive(Debug, Deserialize)]
struct RawResponse {
    results: RawResults,
    status: String,
}

#[derive(Debug, Deserialize)]
struct RawResults {
    sunrise: String,
    sunset: String,
    solar_noon: String,
    day_length: i64,
    civil_twilight_begin: String,
    civil_twilight_end: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SunTimes {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub solar_noon: DateTime<Utc>,
    pub civil_twilight_begin: DateTime<Utc>,
    pub civil_twilight_end: DateTime<Utc>,
    /// Seconds between sunrise and sunset.
    pub day_length: i64,
}

impl SunTimes {
    pub fn from_json(body: &str) -> Result<Self> {
        let raw: RawResponse = serde_json::from_str(body)?;
        if raw.status != "OK" {
            return Err(MoonPhaseError::ApiStatus(raw.status));
        }
        let r = raw.results;
        Ok(Self {
            sunrise: parse_instant(&r.sunrise)?,
            sunset: parse_instant(&r.sunset)?,
            solar_noon: parse_instant(&r.solar_noon)?,
            civil_twilight_begin: parse_instant(&r.civil_twilight_begin)?,
            civil_twilight_end: parse_instant(&r.civil_twilight_end)?,
            day_length: r.day_length,
        })
    }

    pub fn events(&self) -> SunEvents {
        SunEvents {
            sunrise: self.sunrise.into(),
            sunset: self.sunset.into(),
            twilight_end: self.civil_twilight_end.into(),
            twilight_begin: self.civil_twilight_begin.into(),
        }
    }

    pub fn format_day_length(&self) -> String {
        format::hours_minutes(self.day_length)
    }

    /// Label/instant rows for the sun data table.
    pub fn rows(&self) -> [(&'static str, DateTime<Utc>); 5] {
        [
            ("Dawn", self.civil_twilight_begin),
            ("Sunrise", self.sunrise),
            ("Solar noon", self.solar_noon),
            ("Sunset", self.sunset),
            ("Dusk", self.civil_twilight_end),
        ]
    }
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| MoonPhaseError::Timestamp {
            value: value.to_string(),
            source,
        })
}

/// Client for the sunrise-sunset.org API.
#[derive(Clone)]
pub struct SunTimesClient {
    endpoint: String,
    offline: bool,
    timeout: Duration,
    cache: SharedCache,
}

impl SunTimesClient {
    pub fn new(config: &Config, cache: SharedCache) -> Self {
        Self {
            endpoint: config.sun_times_endpoint.clone(),
            offline: config.offline,
            timeout: config.http_timeout,
            cache,
        }
    }

    pub fn fetch(&self, location: Location, date: NaiveDate) -> Result<SunTimes> {
        if self.offline {
            tracing::debug!(target: "sun_times", "serving bundled fixture");
            return SunTimes::from_json(FIXTURE);
        }

        let key = sun_key(date);
        let cached = self.cache.write().get(&key);
        if let Some(body) = cached {
            match SunTimes::from_json(&body) {
                Ok(times) => {
                    tracing::debug!(target: "sun_times", %date, "cache hit");
                    return Ok(times);
                }
                Err(e) => tracing::warn!(target: "sun_times", "Discarding cached sun times: {}", e),
            }
        }

        let body = ureq::get(&self.endpoint)
            .timeout(self.timeout)
            .query("lat", &location.latitude.to_string())
            .query("lng", &location.longitude.to_string())
            .query("date", &date.format("%Y-%m-%d").to_string())
            .query("formatted", "0")
            .call()?
            .into_string()?;

        let times = SunTimes::from_json(&body)?;
        self.cache.write().put(key, body, CacheKind::Sun);
        tracing::info!(
            target: "sun_times",
            %date,
            sunrise = %times.sunrise,
            sunset = %times.sunset,
            "fetched sun times"
        );
        Ok(times)
    }

    /// Fetches sun times for the local calendar date of `instant`, tagged with that date.
    pub fn fetch_for(
        &self,
        location: Location,
        instant: ObservationInstant,
    ) -> Result<(NaiveDate, SunTimes)> {
        let date = local_date(instant);
        self.fetch(location, date).map(|times| (date, times))
    }
}

/// Calendar date of `instant` in the local time zone.
pub fn local_date(instant: ObservationInstant) -> NaiveDate {
    instant
        .date_in(&chrono::Local)
        .unwrap_or_else(|| Utc::now().date_naive())
}
