//! Session lifecycle management for the shared Helix client.
//!
//! The session owns the one client handle every tool handler borrows. Its
//! lifecycle is `Uninitialized -> Ready -> Closed`: Ready is entered either
//! eagerly at startup ([`Session::connect`], which fails fast when
//! credentials are missing) or lazily on first use ([`Session::lazy`]).
//! There is no way back out of Closed; a closed session cannot be reused.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use super::config::CredentialsConfig;
use crate::helix::{Credentials, HelixClient};

/// Credential resolution failure. Fatal at eager startup: the process
/// prints the message and exits non-zero without entering Ready.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error(
        "missing required Twitch credentials: {}. Set the TWITCH_CLIENT_ID, \
         TWITCH_CLIENT_SECRET, TWITCH_ACCESS_TOKEN and TWITCH_REFRESH_TOKEN \
         environment variables (or point TWITCH_TOKEN_FILE at a JSON token \
         file) and restart.",
        .missing.join(", ")
    )]
    Missing { missing: Vec<String> },

    #[error("failed to read token file {}: {}", .path.display(), .source)]
    TokenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("token file {} is not valid JSON: {}", .path.display(), .source)]
    TokenFileFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from requesting the client handle.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session has been closed; no further tool calls are possible.
    #[error("session is closed")]
    Closed,

    /// Lazy initialization failed to resolve credentials.
    #[error(transparent)]
    Credentials(#[from] CredentialError),
}

/// Observable lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Ready,
    Closed,
}

enum Inner {
    Uninitialized,
    Ready(Arc<HelixClient>),
    Closed,
}

/// Owner of the shared Helix client handle.
///
/// Handlers borrow the handle through [`client`](Self::client); none of them
/// owns it. Safe to share across concurrent dispatches; the lock is only
/// held for state transitions, never across a network call.
pub struct Session {
    credentials: CredentialsConfig,
    inner: RwLock<Inner>,
}

impl Session {
    /// Create a session that builds its client on first use.
    pub fn lazy(credentials: CredentialsConfig) -> Self {
        Self {
            credentials,
            inner: RwLock::new(Inner::Uninitialized),
        }
    }

    /// Create a session eagerly, validating credentials up front.
    ///
    /// This is the fail-fast startup path: missing credentials surface here,
    /// before the server accepts any request.
    pub fn connect(credentials: CredentialsConfig) -> Result<Self, CredentialError> {
        let resolved = resolve_credentials(&credentials)?;
        let client = Arc::new(HelixClient::new(resolved));
        info!("Twitch session ready");
        Ok(Self {
            credentials,
            inner: RwLock::new(Inner::Ready(client)),
        })
    }

    /// Get the shared client handle, transitioning `Uninitialized -> Ready`
    /// on first use for lazy sessions.
    pub fn client(&self) -> Result<Arc<HelixClient>, SessionError> {
        {
            let inner = self.read();
            match &*inner {
                Inner::Ready(client) => return Ok(client.clone()),
                Inner::Closed => return Err(SessionError::Closed),
                Inner::Uninitialized => {}
            }
        }

        let mut inner = self.write();
        match &*inner {
            // Another caller initialized while we waited for the lock.
            Inner::Ready(client) => Ok(client.clone()),
            Inner::Closed => Err(SessionError::Closed),
            Inner::Uninitialized => {
                let resolved = resolve_credentials(&self.credentials)?;
                let client = Arc::new(HelixClient::new(resolved));
                info!("Twitch session ready (lazy init)");
                *inner = Inner::Ready(client.clone());
                Ok(client)
            }
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        match &*self.read() {
            Inner::Uninitialized => SessionState::Uninitialized,
            Inner::Ready(_) => SessionState::Ready,
            Inner::Closed => SessionState::Closed,
        }
    }

    /// Close the session, dropping the client handle and its connection
    /// pool. Idempotent: closing a closed session is a no-op.
    pub fn close(&self) {
        let mut inner = self.write();
        if !matches!(&*inner, Inner::Closed) {
            *inner = Inner::Closed;
            info!("Twitch session closed");
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("state", &self.state()).finish()
    }
}

/// Shape of the optional token file: `{"access_token": ..., "refresh_token": ...}`.
#[derive(Debug, Deserialize)]
struct TokenFile {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Resolve the configured credential values into a complete set.
///
/// Tokens missing from the environment may come from the alternate token
/// file path; everything still missing afterwards is reported in one error.
fn resolve_credentials(config: &CredentialsConfig) -> Result<Credentials, CredentialError> {
    let mut access_token = config.access_token.clone();
    let mut refresh_token = config.refresh_token.clone();

    if let Some(path) = &config.token_file {
        if access_token.is_none() || refresh_token.is_none() {
            let raw = std::fs::read_to_string(path).map_err(|source| {
                CredentialError::TokenFile {
                    path: path.clone(),
                    source,
                }
            })?;
            let tokens: TokenFile = serde_json::from_str(&raw).map_err(|source| {
                CredentialError::TokenFileFormat {
                    path: path.clone(),
                    source,
                }
            })?;
            if access_token.is_none() {
                access_token = tokens.access_token;
            }
            if refresh_token.is_none() {
                refresh_token = tokens.refresh_token;
            }
        }
    }

    let mut missing: Vec<String> = Vec::new();
    if config.client_id.is_none() {
        missing.push("TWITCH_CLIENT_ID".to_string());
    }
    if config.client_secret.is_none() {
        missing.push("TWITCH_CLIENT_SECRET".to_string());
    }
    if access_token.is_none() {
        missing.push("TWITCH_ACCESS_TOKEN".to_string());
    }
    if refresh_token.is_none() {
        missing.push("TWITCH_REFRESH_TOKEN".to_string());
    }
    if !missing.is_empty() {
        return Err(CredentialError::Missing { missing });
    }

    match (
        config.client_id.clone(),
        config.client_secret.clone(),
        access_token,
        refresh_token,
    ) {
        (Some(client_id), Some(client_secret), Some(access_token), Some(refresh_token)) => {
            Ok(Credentials {
                client_id,
                client_secret,
                access_token,
                refresh_token,
            })
        }
        // Unreachable: the missing check above covered every field.
        _ => Err(CredentialError::Missing { missing: vec![] }),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    fn full_config() -> CredentialsConfig {
        CredentialsConfig {
            client_id: Some("id".to_string()),
            client_secret: Some("secret".to_string()),
            access_token: Some("token".to_string()),
            refresh_token: Some("refresh".to_string()),
            token_file: None,
        }
    }

    #[test]
    fn test_connect_with_all_credentials_is_ready() {
        let session = Session::connect(full_config()).unwrap();
        assert_eq!(session.state(), SessionState::Ready);
        assert!(session.client().is_ok());
    }

    #[test]
    fn test_connect_without_credentials_names_all_four() {
        let err = Session::connect(CredentialsConfig::default()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("TWITCH_CLIENT_ID"));
        assert!(msg.contains("TWITCH_CLIENT_SECRET"));
        assert!(msg.contains("TWITCH_ACCESS_TOKEN"));
        assert!(msg.contains("TWITCH_REFRESH_TOKEN"));
        assert!(msg.contains("restart"));
    }

    #[test]
    fn test_lazy_transitions_on_first_client() {
        let session = Session::lazy(full_config());
        assert_eq!(session.state(), SessionState::Uninitialized);

        let first = session.client().unwrap();
        assert_eq!(session.state(), SessionState::Ready);

        // The handle is shared, not rebuilt per call.
        let second = session.client().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_lazy_with_missing_credentials_stays_uninitialized() {
        let session = Session::lazy(CredentialsConfig::default());
        assert!(matches!(
            session.client(),
            Err(SessionError::Credentials(_))
        ));
        assert_eq!(session.state(), SessionState::Uninitialized);
    }

    #[test]
    fn test_close_is_idempotent() {
        let session = Session::connect(full_config()).unwrap();
        session.close();
        assert_eq!(session.state(), SessionState::Closed);

        session.close();
        assert_eq!(session.state(), SessionState::Closed);
        assert!(matches!(session.client(), Err(SessionError::Closed)));
    }

    #[test]
    fn test_closed_session_cannot_reopen() {
        let session = Session::lazy(full_config());
        session.close();
        assert!(matches!(session.client(), Err(SessionError::Closed)));
        assert_eq!(session.state(), SessionState::Closed);
    }

    #[test]
    fn test_tokens_from_token_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"access_token": "file-token", "refresh_token": "file-refresh"}}"#
        )
        .unwrap();

        let config = CredentialsConfig {
            client_id: Some("id".to_string()),
            client_secret: Some("secret".to_string()),
            access_token: None,
            refresh_token: None,
            token_file: Some(file.path().to_path_buf()),
        };
        let session = Session::connect(config).unwrap();
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[test]
    fn test_invalid_token_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let config = CredentialsConfig {
            token_file: Some(file.path().to_path_buf()),
            ..full_config()
        };
        // Direct tokens present, file never consulted.
        assert!(Session::connect(config).is_ok());

        let config = CredentialsConfig {
            client_id: Some("id".to_string()),
            client_secret: Some("secret".to_string()),
            access_token: None,
            refresh_token: None,
            token_file: Some(file.path().to_path_buf()),
        };
        assert!(matches!(
            Session::connect(config),
            Err(CredentialError::TokenFileFormat { .. })
        ));
    }
}
