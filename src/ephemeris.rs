//! Closed-form lunar ephemeris.
//!
//! Every function takes the instant explicitly and is total: negative or far-future
//! timestamps still produce normalized values, only with degrading accuracy.

use std::f64::consts::TAU;

use crate::instant::ObservationInstant;

/// Mean length of the synodic month in days.
pub const SYNODIC_PERIOD: f64 = 29.530589;
/// Mean radius of the Earth in miles.
pub const EARTH_RADIUS_MI: f64 = 3959.0;
/// Seconds in one day.
pub const ONE_DAY: f64 = 86_400.0;
/// Julian Date of the Unix epoch.
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const NEW_MOON_EPOCH_JD: f64 = 2_451_550.1;

const ANOMALISTIC_PERIOD: f64 = 27.554_549_88;
const ANOMALISTIC_EPOCH_JD: f64 = 2_451_562.2;

const DRACONIC_PERIOD: f64 = 27.212_220_817;
const DRACONIC_EPOCH_JD: f64 = 2_451_565.2;

const SIDEREAL_PERIOD: f64 = 27.321_582_241;
const SIDEREAL_EPOCH_JD: f64 = 2_451_555.8;

/// Julian Date of `instant`.
pub fn julian_date(instant: ObservationInstant) -> f64 {
    (instant.millis() as f64 / 1000.0 / ONE_DAY) + UNIX_EPOCH_JD
}

/// Fractional part of `value`, wrapped into `[0, 1)` for negative inputs.
pub fn normalize_fraction(value: f64) -> f64 {
    let mut fraction = value - value.trunc();
    if fraction < 0.0 {
        fraction += 1.0;
    }
    // -1e-17 + 1.0 rounds to 1.0
    if fraction >= 1.0 {
        fraction = 0.0;
    }
    fraction
}

/// Days elapsed since the most recent new moon, in `[0, SYNODIC_PERIOD)`.
pub fn synodic_age(instant: ObservationInstant) -> f64 {
    let age = normalize_fraction((julian_date(instant) - NEW_MOON_EPOCH_JD) / SYNODIC_PERIOD)
        * SYNODIC_PERIOD;
    if age >= SYNODIC_PERIOD {
        0.0
    } else {
        age
    }
}

/// Position of the moon in its cycle, in degrees `[0, 360)`.
pub fn phase_angle(synodic_age: f64) -> f64 {
    let angle = synodic_age * (360.0 / SYNODIC_PERIOD);
    if angle >= 360.0 {
        angle - 360.0
    } else {
        angle
    }
}

/// Lit fraction of the visible disc, 0 at new moon and 1 at full moon.
pub fn illumination_ratio(synodic_age: f64) -> f64 {
    0.5 * (1.0 - phase_angle(synodic_age).to_radians().cos())
}

/// Earth-Moon distance in Earth radii.
pub fn distance_in_earth_radii(instant: ObservationInstant) -> f64 {
    let jd = julian_date(instant);
    let anomaly = normalize_fraction((jd - ANOMALISTIC_EPOCH_JD) / ANOMALISTIC_PERIOD) * TAU;
    let elongation = synodic_age(instant) * TAU;

    60.4 - 3.3 * anomaly.cos()
        - 0.6 * (2.0 * elongation - anomaly).cos()
        - 0.5 * (2.0 * elongation).cos()
}

/// Earth-Moon distance in miles.
pub fn distance_in_miles(instant: ObservationInstant) -> f64 {
    distance_in_earth_radii(instant) * EARTH_RADIUS_MI
}

/// Ecliptic latitude in degrees, within ±5.1.
pub fn ecliptic_latitude(instant: ObservationInstant) -> f64 {
    let node = normalize_fraction((julian_date(instant) - DRACONIC_EPOCH_JD) / DRACONIC_PERIOD);
    5.1 * (node * TAU).sin()
}

/// Ecliptic longitude in degrees, wrapped into `[0, 360)`.
pub fn ecliptic_longitude(instant: ObservationInstant) -> f64 {
    let jd = julian_date(instant);
    let anomaly = normalize_fraction((jd - ANOMALISTIC_EPOCH_JD) / ANOMALISTIC_PERIOD) * TAU;
    let elongation = synodic_age(instant) * TAU;
    let mean = normalize_fraction((jd - SIDEREAL_EPOCH_JD) / SIDEREAL_PERIOD);

    let longitude = 360.0 * mean
        + 6.3 * anomaly.sin()
        + 1.3 * (2.0 * elongation - anomaly).sin()
        + 0.7 * (2.0 * elongation).sin();
    longitude.rem_euclid(360.0)
}

/// All values derived from one instant. Computed fresh per query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ephemeris {
    pub instant: ObservationInstant,
    pub julian_date: f64,
    pub synodic_age: f64,
    pub phase_angle: f64,
    pub illumination_ratio: f64,
    pub distance_earth_radii: f64,
    pub ecliptic_latitude: f64,
    pub ecliptic_longitude: f64,
}

impl Ephemeris {
    pub fn at(instant: ObservationInstant) -> Self {
        let age = synodic_age(instant);
        let ephemeris = Self {
            instant,
            julian_date: julian_date(instant),
            synodic_age: age,
            phase_angle: phase_angle(age),
            illumination_ratio: illumination_ratio(age),
            distance_earth_radii: distance_in_earth_radii(instant),
            ecliptic_latitude: ecliptic_latitude(instant),
            ecliptic_longitude: ecliptic_longitude(instant),
        };
        tracing::trace!(
            target: "ephemeris",
            millis = instant.millis(),
            age = ephemeris.synodic_age,
            illumination = ephemeris.illumination_ratio,
            "computed ephemeris"
        );
        ephemeris
    }

    pub fn distance_miles(&self) -> f64 {
        self.distance_earth_radii * EARTH_RADIUS_MI
    }

    pub fn is_waxing(&self) -> bool {
        self.phase_angle < 180.0
    }
}
