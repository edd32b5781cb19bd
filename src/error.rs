use thiserror::Error;

/// Errors raised by the collaborators around the moon engine.
///
/// The astronomical functions themselves are total and never produce one of these.
#[derive(Debug, Error)]
pub enum MoonPhaseError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] Box<ureq::Error>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse timestamp {value:?}: {source}")]
    Timestamp {
        value: String,
        source: chrono::ParseError,
    },

    #[error("Sun times API returned status {0}")]
    ApiStatus(String),

    #[error("Invalid value {value:?} for {key}")]
    InvalidConfig { key: String, value: String },

    #[error("No observer location configured")]
    MissingLocation,

    #[error("Request was cancelled before it completed")]
    Abandoned,
}

impl From<ureq::Error> for MoonPhaseError {
    fn from(err: ureq::Error) -> Self {
        MoonPhaseError::Http(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, MoonPhaseError>;
