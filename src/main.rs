//! MCP Server Entry Point
//!
//! Initializes logging, loads configuration, wires the Stripe gateway into
//! the server, and starts the configured transport.

use std::sync::Arc;

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use commerce_mcp_server::core::{Config, Error, McpServer, TransportService};
use commerce_mcp_server::payments::StripeGateway;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    // The gateway is constructed once and passed to the server explicitly;
    // handlers never reach for process-global state
    let gateway = Arc::new(StripeGateway::new(
        config.credentials.stripe_secret_key.clone(),
    ));
    let server = McpServer::new(config.clone(), gateway);

    info!("Server initialized");

    // Create and run the transport service
    let transport = TransportService::new(config.transport);
    transport.run(server).await.map_err(Error::from)?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level and format.
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
        .with_writer(std::io::stderr)
        .init();
}
