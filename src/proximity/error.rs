//! Error types for proximity queries.

use thiserror::Error;

/// Failures of a proximity submission.
///
/// All of them are recoverable: prior view state stays intact and the user
/// may submit again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Transport failure (connection refused, timeout, TLS, ...)
    #[error("{0}")]
    Network(String),

    /// The service answered with a non-success status
    #[error("proximity service responded with HTTP {0}")]
    Status(u16),

    /// The response body could not be decoded
    #[error("unexpected response from proximity service: {0}")]
    Decode(String),

    /// A query is already pending
    #[error("a proximity query is already running")]
    Busy,

    /// No point has been selected on the map
    #[error("select a point on the map first")]
    NoSelection,
}

impl From<reqwest::Error> for QueryError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Status(status.as_u16()),
            None => Self::Network(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
