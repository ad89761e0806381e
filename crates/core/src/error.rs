//! # Error Taxonomy
//!
//! Two disjoint families: `ApiError` for remote-call failures (translated
//! into user-facing notifications, never retried) and `EngineError` for
//! state-machine misuse (a caller defect, never shown to the user).

use thiserror::Error;

/// Failures reported by the remote catalog API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Session credentials were rejected (HTTP 401). Callers receive a
    /// session-invalidation signal on top of the error notification.
    #[error("unauthorized")]
    Unauthorized,

    /// The server rejected the payload; the message is surfaced to the
    /// user verbatim.
    #[error("{message}")]
    Validation {
        /// Server-provided rejection message.
        message: String,
    },

    /// Generic server-side failure (HTTP 5xx).
    #[error("server error: {message}")]
    Server {
        /// Description of the server failure.
        message: String,
    },

    /// Transport-level failure before a usable response arrived.
    #[error("network error: {message}")]
    Network {
        /// Description of the transport failure.
        message: String,
    },
}

/// Engine usage errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// An operation was invoked while the staged-mutation state machine
    /// forbids it (double staging, confirming with nothing staged, staging
    /// a deletion for an unknown item).
    #[error("invalid state: {reason}")]
    InvalidState {
        /// What the caller did wrong.
        reason: String,
    },
}

impl EngineError {
    pub(crate) fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState {
            reason: reason.into(),
        }
    }
}

/// Result type alias for remote catalog calls.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = ApiError::Validation {
            message: "price must be non-negative".to_string(),
        };
        assert_eq!(err.to_string(), "price must be non-negative");
    }

    #[test]
    fn test_invalid_state_display() {
        let err = EngineError::invalid_state("no deletion is staged");
        assert_eq!(err.to_string(), "invalid state: no deletion is staged");
    }
}
