//! Display strings for the moon and sun data tables.

/// `"{days}d {hours}h"`, hours rounded to the nearest whole hour.
pub fn days_hours(days: f64) -> String {
    let hours = (days * 24.0).round() as i64;
    format!("{}d {}h", hours / 24, hours % 24)
}

/// Degrees, arc minutes and arc seconds, e.g. `"97° 41′ 40″"`.
pub fn degrees_minutes_seconds(degrees: f64) -> String {
    let seconds = (degrees * 3600.0).round() as i64;
    format!(
        "{}° {}′ {}″",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

/// `"{hours}h {minutes}m"` for a duration in seconds.
pub fn hours_minutes(seconds: i64) -> String {
    let minutes = (seconds as f64 / 60.0).round() as i64;
    format!("{}h {}m", minutes / 60, minutes % 60)
}

pub fn percent(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}

pub fn miles(distance: f64) -> String {
    format!("{:.0} mi", distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_hours() {
        assert_eq!(days_hours(0.0), "0d 0h");
        assert_eq!(days_hours(22.779108), "22d 19h");
        assert_eq!(days_hours(7.5), "7d 12h");
    }

    #[test]
    fn test_rounding_carries_into_larger_units() {
        assert_eq!(days_hours(7.99), "8d 0h");
        assert_eq!(degrees_minutes_seconds(97.99999), "98° 0′ 0″");
        assert_eq!(degrees_minutes_seconds(10.999_99), "11° 0′ 0″");
        assert_eq!(hours_minutes(3599), "1h 0m");
        assert_eq!(hours_minutes(7199), "2h 0m");
        assert_eq!(hours_minutes(3629), "1h 0m");
        assert_eq!(hours_minutes(3630), "1h 1m");
    }

    #[test]
    fn test_degrees_minutes_seconds() {
        assert_eq!(degrees_minutes_seconds(0.0), "0° 0′ 0″");
        assert_eq!(degrees_minutes_seconds(90.5), "90° 30′ 0″");
        assert_eq!(degrees_minutes_seconds(277.694389), "277° 41′ 40″");
    }

    #[test]
    fn test_hours_minutes() {
        assert_eq!(hours_minutes(51_444), "14h 17m");
        assert_eq!(hours_minutes(3600), "1h 0m");
        assert_eq!(hours_minutes(0), "0h 0m");
    }

    #[test]
    fn test_percent_and_miles() {
        assert_eq!(percent(0.433), "43%");
        assert_eq!(percent(1.0), "100%");
        assert_eq!(miles(242_842.52), "242843 mi");
    }
}
