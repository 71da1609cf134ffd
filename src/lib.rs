//! MySQL MCP Server Library
//!
//! This library exposes one MySQL database to MCP clients: read-only query
//! execution, schema introspection, and URI-addressed table sampling.

pub mod config;
pub mod db;
pub mod error;
pub mod mcp;
pub mod models;
pub mod tools;
pub mod transport;

pub use config::Config;
pub use error::GatewayError;
pub use mcp::MySqlService;
