//! MySQL MCP Server - Main entry point.
//!
//! This server provides MCP (Model Context Protocol) tools for AI assistants
//! to run read-only queries against a MySQL database.

use clap::Parser;
use mysql_mcp_server::config::Config;
use mysql_mcp_server::db::PoolManager;
use mysql_mcp_server::transport::{StdioTransport, Transport};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
///
/// Everything goes to stderr; stdout belongs to the MCP protocol.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse configuration from environment variables and command line.
    // Missing required settings (host, port, user, database) are fatal here,
    // before any gateway component is constructed.
    let config = Config::parse();

    // Initialize logging
    init_tracing(&config);

    info!(
        host = %config.host,
        database = %config.database,
        "Starting MySQL MCP Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Create the shared pool and verify connectivity up front. A failure is
    // logged but not fatal: the first tool call retries lazily.
    let pool_manager = Arc::new(PoolManager::new(config.pool_config()));
    if let Err(e) = pool_manager.ensure_ready().await {
        error!(error = %e, "Initial MySQL connection failed; will retry on first use");
    }

    let transport = StdioTransport::new(pool_manager);
    info!(transport = transport.name(), "Using stdio transport");

    if let Err(e) = transport.run().await {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
