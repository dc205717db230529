//! Error types for think.

use thiserror::Error;

/// Result type alias using think's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for think operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No record exists for this id, or the id is not a UUID v4.
    ///
    /// Carries the id exactly as the caller supplied it, so malformed ids
    /// are reported verbatim.
    #[error("Not Found Record by id:{0}")]
    RecordNotFound(String),

    /// HTTP/network request failed before a response was received
    #[error("Request error: {0}")]
    Request(String),

    /// Server answered with a status the operation does not accept
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Serialized document could not be parsed or rendered
    #[error("Render error: {0}")]
    Render(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this is the not-found kind (local validation or server 404).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::RecordNotFound(_))
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::RecordNotFound(_) => Some(404),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Error::Serialization(e.to_string())
        } else {
            Error::Request(e.to_string())
        }
    }
}
