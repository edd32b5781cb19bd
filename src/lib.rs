//! Lunar phase, illumination and distance for any day, with the local daylight schedule.
//!
//! The astronomical core (`ephemeris`, `phase`, `limb`, `day_period`) is pure and
//! synchronous. Everything that touches the network or the screen sits around it.

pub mod cache;
pub mod config;
pub mod day_period;
pub mod ephemeris;
pub mod error;
pub mod format;
pub mod instant;
pub mod limb;
pub mod location;
pub mod logging;
pub mod phase;
pub mod report;
pub mod request;
pub mod sun_times;
pub mod weather;

#[cfg(feature = "gui")]
pub mod app;

pub use day_period::{DayPeriod, SunEvents};
pub use ephemeris::Ephemeris;
pub use error::{MoonPhaseError, Result};
pub use instant::{Navigation, ObservationInstant, Selection};
pub use limb::{Disc, LimbPolygon, Point};
pub use phase::PhaseName;
pub use report::MoonReport;
