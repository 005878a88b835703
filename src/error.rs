use thiserror::Error;

#[derive(Error, Debug)]
pub enum JekinError {
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid lead time: {0} hours (must be between 1 and 168 hours)")]
    InvalidLeadTime(f64),

    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Itinerary error: {0}")]
    ItineraryError(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, JekinError>;
