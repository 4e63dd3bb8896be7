//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to a psyche server.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server does not know the session id.
    #[error("Invalid session.")]
    InvalidSession,

    /// The server refused the request.
    #[error("request rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The response body did not match the wire contract.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Returns `true` if the server has forgotten the session and the caller
    /// should start a new one to continue.
    pub fn requires_restart(&self) -> bool {
        matches!(self, ClientError::InvalidSession)
    }
}
