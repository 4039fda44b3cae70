//! Error types for the sensor.

use caliper_kernel::CaliperError;

#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encoding of an envelope failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The collector answered with a non-success status
    #[error("collector error {status}: {message}")]
    Server { status: u16, message: String },

    /// A document could not be built or rendered
    #[error(transparent)]
    Model(#[from] CaliperError),

    /// Options could not be read or are unusable
    #[error("invalid sensor options: {0}")]
    Options(String),

    /// Nothing to deliver to
    #[error("sensor `{0}` has no registered clients")]
    NoClients(String),
}

pub type Result<T> = std::result::Result<T, SensorError>;
