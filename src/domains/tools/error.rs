//! Tool-specific error types.
//!
//! Two layers: `HandlerError` is what a handler itself can produce
//! (argument validation or an upstream API failure), `DispatchError` is what
//! the dispatcher adds on top (unresolved names, session state). Neither is
//! ever retried here; retry policy belongs to the API client's owner.

use thiserror::Error;

use crate::core::session::SessionError;
use crate::helix::HelixError;

/// Errors a tool handler can produce.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The supplied arguments did not decode into the tool's request type.
    /// Raised before any network call is made.
    #[error("invalid arguments: {0}")]
    Validation(String),

    /// The Helix API call failed.
    #[error(transparent)]
    Upstream(#[from] HelixError),
}

impl HandlerError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Errors produced by the dispatcher.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The requested tool name has no registry entry.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The resolved handler failed; the original failure is preserved as
    /// the source.
    #[error("tool '{name}' failed: {source}")]
    Execution {
        name: String,
        #[source]
        source: HandlerError,
    },

    /// The session could not supply a client handle.
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tool_names_the_tool() {
        let err = DispatchError::UnknownTool("twitch_fly_away".to_string());
        assert_eq!(err.to_string(), "Unknown tool: twitch_fly_away");
    }

    #[test]
    fn test_execution_preserves_cause() {
        let err = DispatchError::Execution {
            name: "twitch_create_poll".to_string(),
            source: HandlerError::validation("missing field `title`"),
        };
        let msg = err.to_string();
        assert!(msg.contains("twitch_create_poll"));
        assert!(msg.contains("missing field `title`"));
    }
}
