//! Error types for the API gateway.

use thiserror::Error;

/// Errors raised by gateway requests.
///
/// Callers treat every variant as "the request failed"; a response is
/// never partially applied.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// No response reached us (connection refused, DNS, timeout).
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP error: status {status}")]
    Http {
        /// HTTP status code of the response.
        status: u16,
    },

    /// The response body could not be decoded as the expected JSON shape.
    #[error("JSON decode error: {0}")]
    Json(String),
}

impl ApiError {
    /// Returns a user-friendly message suitable for display in a frontend.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Transport(_) => "Could not reach the QuranRef server. Check your connection.",
            Self::Http { status } if *status == 401 || *status == 403 => {
                "You are not signed in, or your session has expired."
            }
            Self::Http { .. } => "The QuranRef server rejected the request.",
            Self::Json(_) => "The QuranRef server returned an unexpected response.",
        }
    }

    /// True when no response reached us at all.
    ///
    /// Session teardown treats transport failures differently from server
    /// rejections: a logout that never reached the server leaves the
    /// session state alone.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Json(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Http {
                status: status.as_u16(),
            }
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = ApiError::Transport("connection refused".to_string());
        assert!(err.user_message().contains("connection"));

        let err = ApiError::Http { status: 401 };
        assert!(err.user_message().contains("signed in"));

        let err = ApiError::Json("missing field".to_string());
        assert!(err.user_message().contains("unexpected"));
    }

    #[test]
    fn test_is_transport() {
        assert!(ApiError::Transport("down".to_string()).is_transport());
        assert!(!ApiError::Http { status: 500 }.is_transport());
        assert!(!ApiError::Json("bad".to_string()).is_transport());
    }
}
