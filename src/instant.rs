use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Milliseconds in one calendar day of navigation.
pub const DAY_MILLIS: i64 = 86_400_000;

/// An absolute point in time, in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObservationInstant(i64);

impl ObservationInstant {
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn millis(self) -> i64 {
        self.0
    }

    pub fn next_day(self) -> Self {
        Self(self.0.saturating_add(DAY_MILLIS))
    }

    pub fn previous_day(self) -> Self {
        Self(self.0.saturating_sub(DAY_MILLIS))
    }

    /// `None` only for instants outside chrono's representable range.
    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }

    /// Calendar date of this instant as seen in `tz`.
    pub fn date_in<Tz: TimeZone>(self, tz: &Tz) -> Option<NaiveDate> {
        self.to_utc()
            .map(|utc| utc.with_timezone(tz).date_naive())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for ObservationInstant {
    fn from(value: DateTime<Tz>) -> Self {
        Self(value.timestamp_millis())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Prev,
    Next,
    Today,
}

/// The instant the viewer is currently looking at.
///
/// Starts at "now" and is replaced wholesale on every navigation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    instant: ObservationInstant,
}

impl Selection {
    pub fn now() -> Self {
        Self {
            instant: ObservationInstant::now(),
        }
    }

    pub fn at(instant: ObservationInstant) -> Self {
        Self { instant }
    }

    pub fn instant(&self) -> ObservationInstant {
        self.instant
    }

    pub fn apply(&mut self, action: Navigation) -> ObservationInstant {
        self.instant = match action {
            Navigation::Prev => self.instant.previous_day(),
            Navigation::Next => self.instant.next_day(),
            Navigation::Today => ObservationInstant::now(),
        };
        tracing::debug!(target: "navigation", ?action, millis = self.instant.millis(), "selection changed");
        self.instant
    }
}
