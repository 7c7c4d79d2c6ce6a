//! Error types for fakecloud-sdk.

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for client calls.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be sent or no response arrived
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a status other than the one the call expects
    #[error("unexpected status code: {status}")]
    UnexpectedStatus {
        status: StatusCode,
        /// Response text, usually the service's error message
        body: String,
    },

    /// The response body did not decode into the expected shape
    #[error("failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl Error {
    /// Status code observed on the response, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}
