//! Twitch MCP Server Library
//!
//! This crate exposes the Twitch Helix API as a set of MCP (Model Context
//! Protocol) tools, so MCP clients can drive platform operations - send a
//! chat message, create a poll, ban a user - through a uniform tool-call
//! interface.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the session owning the shared
//!   Helix client, the MCP server handler, and the transport layer
//! - **helix**: the typed Twitch Helix HTTP client and per-domain endpoints
//! - **domains::tools**: the capability-module contract, the tool registry,
//!   and the dispatcher, plus one capability module per API domain
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use twitch_mcp_server::core::{Config, McpServer, Session};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let session = Arc::new(Session::connect(config.credentials.clone())?);
//!     let server = McpServer::new(config, session);
//!     // Hand the server to a transport...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;
pub mod helix;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result, Session};
pub use domains::tools::{CapabilityModule, ToolRegistry, dispatch};
pub use helix::HelixClient;
