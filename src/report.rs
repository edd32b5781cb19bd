use crate::ephemeris::Ephemeris;
use crate::format;
use crate::instant::ObservationInstant;
use crate::phase::PhaseName;

/// Everything the moon data table shows for one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct MoonReport {
    pub ephemeris: Ephemeris,
    pub phase: PhaseName,
    pub synodic_age: String,
    pub julian_date: String,
    pub phase_angle: String,
    pub distance: String,
    pub illumination: String,
    pub ecliptic_latitude: String,
    pub ecliptic_longitude: String,
}

impl MoonReport {
    pub fn for_instant(instant: ObservationInstant) -> Self {
        Self::from_ephemeris(Ephemeris::at(instant))
    }

    pub fn from_ephemeris(ephemeris: Ephemeris) -> Self {
        Self {
            phase: PhaseName::classify(ephemeris.synodic_age),
            synodic_age: format::days_hours(ephemeris.synodic_age),
            julian_date: format!("{:.4}", ephemeris.julian_date),
            phase_angle: format::degrees_minutes_seconds(ephemeris.phase_angle),
            distance: format::miles(ephemeris.distance_miles()),
            illumination: format::percent(ephemeris.illumination_ratio),
            ecliptic_latitude: format!("{:.2}°", ephemeris.ecliptic_latitude),
            ecliptic_longitude: format!("{:.2}°", ephemeris.ecliptic_longitude),
            ephemeris,
        }
    }

    /// Label/value rows in display order.
    pub fn rows(&self) -> [(&'static str, &str); 8] {
        [
            ("Phase", self.phase.label()),
            ("Age", &self.synodic_age),
            ("Illumination", &self.illumination),
            ("Distance", &self.distance),
            ("Phase angle", &self.phase_angle),
            ("Julian date", &self.julian_date),
            ("Ecliptic latitude", &self.ecliptic_latitude),
            ("Ecliptic longitude", &self.ecliptic_longitude),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_at_unix_epoch() {
        let report = MoonReport::for_instant(ObservationInstant::from_millis(0));
        assert_eq!(report.phase, PhaseName::WaningCrescent);
        assert_eq!(report.synodic_age, "22d 19h");
        assert_eq!(report.julian_date, "2440587.5000");
        assert_eq!(report.phase_angle, "277° 41′ 40″");
        assert_eq!(report.distance, "242843 mi");
        assert_eq!(report.illumination, "43%");
    }

    #[test]
    fn test_rows_lead_with_phase_name() {
        let report = MoonReport::for_instant(ObservationInstant::from_millis(947_182_440_000));
        let rows = report.rows();
        assert_eq!(rows[0], ("Phase", "New Moon"));
        assert_eq!(rows.len(), 8);
    }
}
