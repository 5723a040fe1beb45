//! Request error definitions.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while issuing one request attempt.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The reqwest client (timeout, proxy) could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// Network failure, timeout, or an unsendable request.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("Error {}: {}", .status.as_u16(), .body)]
    Status { status: StatusCode, body: String },
}

impl RequestError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
