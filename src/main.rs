//! MCP Server Entry Point
//!
//! Initializes logging, loads configuration, establishes the Twitch session
//! (failing fast when credentials are missing), and starts the server with
//! the configured transport.

use std::sync::Arc;

use anyhow::Result;
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use twitch_mcp_server::core::{Config, McpServer, Session, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    // Establish the Twitch session. The eager (default) path verifies
    // credentials before the server accepts any request.
    let session = if config.session.eager {
        match Session::connect(config.credentials.clone()) {
            Ok(session) => Arc::new(session),
            Err(e) => {
                error!("{}", e);
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    } else {
        Arc::new(Session::lazy(config.credentials.clone()))
    };

    // Create the MCP server
    let server = McpServer::new(config.clone(), session.clone());

    info!("Server initialized");

    // Create and run the transport service
    let transport = TransportService::new(config.transport);
    transport.run(server).await?;

    session.close();
    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level, writing to stderr so
/// stdout stays clean for the STDIO transport.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
