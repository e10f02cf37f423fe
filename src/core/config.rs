//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, configuration files, or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Twitch credential configuration.
    pub credentials: CredentialsConfig,

    /// Session lifecycle configuration.
    pub session: SessionConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Session lifecycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Whether the Twitch client is constructed (and credentials verified)
    /// at startup rather than on first use.
    pub eager: bool,
}

/// Twitch credential configuration.
///
/// All values optional here; the session resolves and validates the full set
/// when the client is constructed.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Application client ID.
    pub client_id: Option<String>,

    /// Application client secret.
    pub client_secret: Option<String>,

    /// User access token.
    pub access_token: Option<String>,

    /// Refresh token for the access token.
    pub refresh_token: Option<String>,

    /// Alternate credential path: a JSON file holding the two tokens.
    pub token_file: Option<PathBuf>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("token_file", &self.token_file)
            .finish()
    }
}

impl CredentialsConfig {
    /// Load credential values from `TWITCH_*` environment variables.
    pub fn from_env() -> Self {
        let config = Self {
            client_id: std::env::var("TWITCH_CLIENT_ID").ok(),
            client_secret: std::env::var("TWITCH_CLIENT_SECRET").ok(),
            access_token: std::env::var("TWITCH_ACCESS_TOKEN").ok(),
            refresh_token: std::env::var("TWITCH_REFRESH_TOKEN").ok(),
            token_file: std::env::var("TWITCH_TOKEN_FILE").ok().map(PathBuf::from),
        };

        if config.client_id.is_some() {
            info!("Twitch credentials loaded from environment");
        } else {
            warn!(
                "TWITCH_CLIENT_ID not set - Twitch API calls will fail until \
                 credentials are configured"
            );
        }

        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "twitch-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            session: SessionConfig { eager: true },
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server and transport settings use the `MCP_` prefix
    /// (e.g. `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_TRANSPORT`);
    /// credentials use `TWITCH_`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(mode) = std::env::var("MCP_SESSION_MODE") {
            config.session.eager = mode.to_lowercase() != "lazy";
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config.credentials = CredentialsConfig::from_env();

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_credentials_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("TWITCH_CLIENT_ID", "abc123");
            std::env::set_var("TWITCH_ACCESS_TOKEN", "token456");
        }
        let config = CredentialsConfig::from_env();
        assert_eq!(config.client_id.as_deref(), Some("abc123"));
        assert_eq!(config.access_token.as_deref(), Some("token456"));
        unsafe {
            std::env::remove_var("TWITCH_CLIENT_ID");
            std::env::remove_var("TWITCH_ACCESS_TOKEN");
        }
    }

    #[test]
    fn test_credentials_absent_by_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("TWITCH_CLIENT_ID");
            std::env::remove_var("TWITCH_CLIENT_SECRET");
        }
        let config = CredentialsConfig::from_env();
        assert!(config.client_id.is_none());
        assert!(config.client_secret.is_none());
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let creds = CredentialsConfig {
            client_id: Some("public-id".to_string()),
            client_secret: Some("super_secret".to_string()),
            access_token: Some("super_token".to_string()),
            refresh_token: None,
            token_file: None,
        };
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("public-id"));
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret"));
        assert!(!debug_str.contains("super_token"));
    }

    #[test]
    fn test_session_mode_lazy() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_SESSION_MODE", "lazy");
        }
        let config = Config::from_env();
        assert!(!config.session.eager);
        unsafe {
            std::env::remove_var("MCP_SESSION_MODE");
        }
        let config = Config::from_env();
        assert!(config.session.eager);
    }
}
