//! Transport layer for the MCP server.
//!
//! The gateway speaks MCP over standard input/output, the conventional mode
//! for CLI-hosted servers. The core never parses wire framing itself; rmcp
//! hands it already-decoded tool and resource invocations.

pub mod stdio;

pub use stdio::StdioTransport;

use crate::error::GatewayResult;
use std::future::Future;

/// Trait for MCP transport implementations.
///
/// Transports handle the low-level communication between the MCP server
/// and clients, abstracting away the protocol details.
pub trait Transport: Send + Sync {
    /// Start the transport and begin handling requests.
    ///
    /// This method should block until the transport is shut down.
    fn run(&self) -> impl Future<Output = GatewayResult<()>> + Send;

    /// Get the name of this transport for logging.
    fn name(&self) -> &'static str;
}
