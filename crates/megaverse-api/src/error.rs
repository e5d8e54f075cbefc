//! Error types for the megaverse transport client
//!
//! Distinguishes the one recoverable condition (rate limiting, handled
//! inside the client by backoff) from the fatal ones:
//! - Non-2xx, non-429 responses
//! - Retry budget exhaustion
//! - Transport-level failures (connect, timeout)
//! - Malformed response bodies

use reqwest::StatusCode;

/// Transport client error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Service responded with a non-success, non-rate-limit status
    #[error("HTTP {status} from {url}: {body}")]
    Status {
        /// Response status of the failed attempt
        status: StatusCode,
        /// Request URL
        url: String,
        /// Response body, if readable
        body: String,
    },

    /// Every attempt was rate limited until the budget ran out
    #[error("{method} {url} failed after {attempts} attempts (rate limited)")]
    RetriesExhausted {
        /// HTTP method of the failed call
        method: &'static str,
        /// Request URL
        url: String,
        /// Attempts performed
        attempts: u32,
    },

    /// Request never produced a response (connect failure, timeout)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Check if the error is the rate-limit budget running out
    #[inline]
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RetriesExhausted { .. })
    }

    /// Status code of the failed response, if one was received
    #[inline]
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhaustion_is_classified_as_rate_limited() {
        let err = ApiError::RetriesExhausted {
            method: "POST",
            url: "http://localhost/polyanets".to_string(),
            attempts: 5,
        };
        assert!(err.is_rate_limited());
        assert!(err.status().is_none());
    }

    #[test]
    fn status_error_exposes_code() {
        let err = ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            url: "http://localhost/soloons".to_string(),
            body: "boom".to_string(),
        };
        assert!(!err.is_rate_limited());
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn messages_name_the_failed_call() {
        let err = ApiError::RetriesExhausted {
            method: "POST",
            url: "http://localhost/comeths".to_string(),
            attempts: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("POST"));
        assert!(msg.contains("/comeths"));
        assert!(msg.contains("5 attempts"));
    }
}
