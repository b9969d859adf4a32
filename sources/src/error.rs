use cosmicview_common::CoordError;
use thiserror::Error;

/// Custom error type for all fetches, allow us to differentiate between errors.
///
/// Transport and decode problems both end up as a failed fetch at the caller,
/// the variants are only there for logging.
///
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Bad parameter {0}")]
    BadParam(String),
    #[error("Bad coordinate: {0}")]
    BadCoord(#[from] CoordError),
    #[error("Decoding response: {0}")]
    Decoding(#[from] serde_json::Error),
    #[error("HTTP Error: {0}")]
    HTTP(#[from] reqwest::Error),
    #[error("Error({0}): {1}")]
    Status(u16, String),
    #[error("Missing field {0} in response")]
    MissingField(&'static str),
    #[error("No API key for {0}")]
    NoAPIKey(String),
    #[error("No such route {1} for site {0}")]
    UnknownRoute(String, String),
    #[error("No such site {0}")]
    UnknownSite(String),
}
