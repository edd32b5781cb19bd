use crate::instant::ObservationInstant;

/// Ambient lighting period of the selected instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayPeriod {
    Daytime,
    Evening,
    Night,
    Morning,
    #[default]
    Unknown,
}

/// The four sun events that bound the lighting periods of one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunEvents {
    pub sunrise: ObservationInstant,
    pub sunset: ObservationInstant,
    pub twilight_end: ObservationInstant,
    pub twilight_begin: ObservationInstant,
}

impl DayPeriod {
    /// First matching rule wins. Daytime starts inclusively at sunrise.
    pub fn classify(now: ObservationInstant, events: &SunEvents) -> Self {
        if events.sunrise <= now && now < events.sunset {
            DayPeriod::Daytime
        } else if events.sunset <= now && now < events.twilight_end {
            DayPeriod::Evening
        } else if now >= events.twilight_end {
            DayPeriod::Night
        } else if now >= events.twilight_begin {
            DayPeriod::Morning
        } else {
            DayPeriod::Unknown
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayPeriod::Daytime => "daytime",
            DayPeriod::Evening => "evening",
            DayPeriod::Night => "night",
            DayPeriod::Morning => "morning",
            DayPeriod::Unknown => "unknown",
        }
    }
}
