//! Error types for backend access.

use thiserror::Error;

/// Errors that can occur when talking to a ticket backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network unreachable or connection failed.
    #[error("network error: {0}")]
    Transport(String),

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// The backend rejected the bearer token (401).
    ///
    /// The application tears the session down when it sees this.
    #[error("authentication failed")]
    Auth,

    /// Non-2xx response with a body.
    #[error("server error ({status}): {body}")]
    Server { status: u16, body: String },

    /// Failed to parse a response body.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// The referenced ticket does not exist.
    #[error("ticket not found: {0}")]
    NotFound(String),

    /// Local storage failure (offline backend).
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::Transport(err.to_string())
        } else if err.is_decode() {
            ApiError::Parse(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ApiError::Server { status: 500, body: "boom".to_string() };
        assert_eq!(err.to_string(), "server error (500): boom");

        assert_eq!(ApiError::Auth.to_string(), "authentication failed");
        assert_eq!(
            ApiError::NotFound("1234".to_string()).to_string(),
            "ticket not found: 1234"
        );
    }
}
