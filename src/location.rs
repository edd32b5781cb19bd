use crate::error::{MoonPhaseError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Source of the observer's position.
pub trait LocationProvider: Send + Sync {
    fn locate(&self) -> Result<Location>;
}

/// Coordinates taken from configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfiguredLocation {
    location: Option<Location>,
}

impl ConfiguredLocation {
    pub fn new(location: Option<Location>) -> Self {
        Self { location }
    }
}

impl LocationProvider for ConfiguredLocation {
    fn locate(&self) -> Result<Location> {
        self.location.ok_or(MoonPhaseError::MissingLocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_location() {
        let here = Location {
            latitude: 40.7,
            longitude: -74.0,
        };
        assert_eq!(ConfiguredLocation::new(Some(here)).locate().unwrap(), here);
        assert!(matches!(
            ConfiguredLocation::default().locate(),
            Err(MoonPhaseError::MissingLocation)
        ));
    }
}
