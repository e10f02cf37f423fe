//! Helix client error types.

use thiserror::Error;

/// Result type for Helix API operations.
pub type HelixResult<T> = Result<T, HelixError>;

/// Errors that can occur while talking to the Helix API.
#[derive(Debug, Error)]
pub enum HelixError {
    /// The API answered with a non-success status code.
    #[error("Twitch API error ({status}): {message}")]
    Status { status: u16, message: String },

    /// The request never completed (connect, TLS, timeout, ...).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be decoded into the expected type.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The API answered 200 with an empty `data` array where one entry
    /// was expected.
    #[error("Twitch API returned no data")]
    EmptyData,
}

impl HelixError {
    /// Create a status error.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Whether this error is an HTTP 404 from the API.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_includes_code_and_message() {
        let err = HelixError::status(403, "missing scope: moderator:manage:banned_users");
        let msg = err.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("missing scope"));
    }

    #[test]
    fn test_is_not_found() {
        assert!(HelixError::status(404, "subscription not found").is_not_found());
        assert!(!HelixError::status(401, "invalid token").is_not_found());
        assert!(!HelixError::EmptyData.is_not_found());
    }
}
