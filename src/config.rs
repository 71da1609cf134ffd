//! Configuration handling for the MySQL MCP Server.
//!
//! Configuration comes from environment variables (the conventional way MCP
//! hosts pass settings to stdio servers) with CLI flags as overrides. The
//! four connection coordinates are required; a missing one is rejected by
//! clap before any gateway component is constructed.

use clap::Parser;

/// Default maximum number of pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Acquire deadline used when the wait queue is unbounded. sqlx requires
/// some deadline, so "wait indefinitely" is approximated with one that
/// outlives any real deployment (~136 years).
pub const UNBOUNDED_ACQUIRE_SECS: u64 = u32::MAX as u64;

/// Acquire deadline used when the wait queue is bounded.
pub const BOUNDED_ACQUIRE_SECS: u64 = 30;

#[derive(Parser, Debug, Clone)]
#[command(name = "mysql-mcp-server", version, about)]
pub struct Config {
    /// MySQL server hostname
    #[arg(long, env = "MYSQL_HOST")]
    pub host: String,

    /// MySQL server port
    #[arg(long, env = "MYSQL_PORT")]
    pub port: u16,

    /// MySQL username
    #[arg(long, env = "MYSQL_USER")]
    pub user: String,

    /// MySQL password (optional; empty for passwordless login)
    #[arg(long, env = "MYSQL_PASS", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Database to expose
    #[arg(long, env = "MYSQL_DB")]
    pub database: String,

    /// Maximum connections in the pool
    #[arg(long, env = "MYSQL_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON")]
    pub json_logs: bool,
}

impl Config {
    /// Build the immutable pool configuration from the validated input.
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            host: self.host.clone(),
            port: self.port,
            user: self.user.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
            max_connections: self.max_connections.max(1),
            acquire_queue_unbounded: true,
        }
    }
}

/// Connection pool configuration. Immutable after construction; built once
/// from the validated environment input.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    /// Sensitive - never logged.
    pub password: String,
    pub database: String,
    /// Upper bound on concurrently checked-out connections.
    pub max_connections: u32,
    /// When true, saturated acquisition waits in FIFO order with no
    /// practical deadline instead of failing. Callers can wait indefinitely
    /// if the pool never frees a connection; that is inherited behavior,
    /// kept deliberately.
    pub acquire_queue_unbounded: bool,
}

impl PoolConfig {
    /// Effective acquire deadline in seconds.
    pub fn acquire_timeout_secs(&self) -> u64 {
        if self.acquire_queue_unbounded {
            UNBOUNDED_ACQUIRE_SECS
        } else {
            BOUNDED_ACQUIRE_SECS
        }
    }
}
