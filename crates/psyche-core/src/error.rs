//! Session error types.
//!
//! Returned as ordinary values by the session engine; none of them leave the
//! engine in a partially updated state.

use thiserror::Error;

/// Errors surfaced by the session engine and its input boundaries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// The id does not name an active session (never started, already
    /// completed, expired, or garbled).
    #[error("Invalid session.")]
    InvalidSession,

    /// A rating fell outside the accepted 1–5 range.
    #[error("Rating must be between 1 and 5, got {0}.")]
    RatingOutOfRange(f64),
}

impl SessionError {
    /// Returns `true` if the caller should start a new session to continue.
    pub fn requires_restart(&self) -> bool {
        matches!(self, SessionError::InvalidSession)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_session_message_is_wire_text() {
        assert_eq!(SessionError::InvalidSession.to_string(), "Invalid session.");
    }

    #[test]
    fn restart_classification() {
        assert!(SessionError::InvalidSession.requires_restart());
        assert!(!SessionError::RatingOutOfRange(9.0).requires_restart());
    }
}
