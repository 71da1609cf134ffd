//! Error types for the MySQL MCP Server.
//!
//! This module defines all error types using `thiserror` for ergonomic error
//! handling. Recoverable failures are values that travel inline in tool
//! responses; only missing startup configuration is fatal to the process,
//! and that is rejected by the CLI parser before any of these types exist.

use thiserror::Error;

/// The fixed refusal message for statements that fail the read-only policy.
pub const POLICY_REFUSAL: &str = "Only SELECT, SHOW, EXPLAIN and DESCRIBE queries are allowed";

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection failed: {message}")]
    Connect { message: String },

    /// Driver-level failure. The message is the driver's own text, preserved
    /// verbatim so the caller sees exactly what the server reported.
    #[error("{message}")]
    Driver {
        message: String,
        /// e.g., "42S02" for unknown table
        sql_state: Option<String>,
    },

    #[error("{POLICY_REFUSAL}")]
    Policy,

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl GatewayError {
    /// Create a connection error.
    pub fn connect(message: impl Into<String>) -> Self {
        Self::Connect {
            message: message.into(),
        }
    }

    /// Create a driver error with optional SQLSTATE.
    pub fn driver(message: impl Into<String>, sql_state: Option<String>) -> Self {
        Self::Driver {
            message: message.into(),
            sql_state,
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the SQLSTATE for this error, if the driver reported one.
    pub fn sql_state(&self) -> Option<&str> {
        match self {
            Self::Driver { sql_state, .. } => sql_state.as_deref(),
            _ => None,
        }
    }

    /// Check if this error indicates a connectivity problem rather than a
    /// problem with the statement itself.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Connect { .. })
    }
}

/// Convert sqlx errors to GatewayError.
impl From<sqlx::Error> for GatewayError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(msg) => GatewayError::connect(msg.to_string()),
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string());
                GatewayError::driver(db_err.message(), code)
            }
            sqlx::Error::PoolTimedOut => {
                GatewayError::connect("Timed out waiting for a pool connection")
            }
            sqlx::Error::PoolClosed => GatewayError::connect("Connection pool is closed"),
            sqlx::Error::Io(io_err) => GatewayError::connect(format!("I/O error: {}", io_err)),
            sqlx::Error::Tls(tls_err) => GatewayError::connect(format!("TLS error: {}", tls_err)),
            sqlx::Error::Protocol(msg) => GatewayError::connect(format!("Protocol error: {}", msg)),
            sqlx::Error::ColumnNotFound(col) => {
                GatewayError::driver(format!("Column not found: {}", col), None)
            }
            sqlx::Error::ColumnIndexOutOfBounds { index, len } => GatewayError::internal(format!(
                "Column index {} out of bounds (len: {})",
                index, len
            )),
            sqlx::Error::ColumnDecode { index, source } => {
                GatewayError::internal(format!("Failed to decode column {}: {}", index, source))
            }
            sqlx::Error::Decode(source) => {
                GatewayError::internal(format!("Decode error: {}", source))
            }
            sqlx::Error::WorkerCrashed => GatewayError::internal("Database worker crashed"),
            _ => GatewayError::internal(format!("Unknown database error: {}", err)),
        }
    }
}

/// Result type alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_display() {
        let err = GatewayError::connect("Access denied for user 'app'@'localhost'");
        assert!(err.to_string().contains("Connection failed"));
        assert!(err.to_string().contains("Access denied"));
    }

    #[test]
    fn test_driver_message_verbatim() {
        let err = GatewayError::driver(
            "Table 'shop.orders' doesn't exist",
            Some("42S02".to_string()),
        );
        // The driver message must come through untouched, with no prefix.
        assert_eq!(err.to_string(), "Table 'shop.orders' doesn't exist");
        assert_eq!(err.sql_state(), Some("42S02"));
    }

    #[test]
    fn test_policy_display_is_fixed_refusal() {
        assert_eq!(GatewayError::Policy.to_string(), POLICY_REFUSAL);
    }

    #[test]
    fn test_is_connect() {
        assert!(GatewayError::connect("refused").is_connect());
        assert!(!GatewayError::Policy.is_connect());
        assert!(!GatewayError::driver("syntax error", None).is_connect());
    }

    #[test]
    fn test_from_pool_closed() {
        let err: GatewayError = sqlx::Error::PoolClosed.into();
        assert!(err.is_connect());
    }
}
