//! Connection pool management.
//!
//! This module owns the single MySQL connection pool. The pool is created
//! lazily behind a one-time initialization guard: concurrent first callers
//! race to the same `OnceCell`, so exactly one connect-and-verify handshake
//! happens no matter how many calls arrive at once. A failed initialization
//! leaves the guard empty, so the next call retries from scratch - there is
//! no automatic reconnection loop beyond that.

use crate::config::PoolConfig;
use crate::error::{GatewayError, GatewayResult};
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::MySqlPool;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{error, info};

/// Single source of truth for connectivity state.
///
/// The pool is the only component that creates or closes raw connections;
/// everything else borrows a connection for the duration of one statement
/// via the shared `MySqlPool` handle.
#[derive(Debug)]
pub struct PoolManager {
    config: PoolConfig,
    pool: OnceCell<MySqlPool>,
}

impl PoolManager {
    /// Create a new pool manager. No connection is made until first use.
    pub fn new(config: PoolConfig) -> Self {
        Self {
            config,
            pool: OnceCell::new(),
        }
    }

    /// The immutable configuration this pool was built from.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Verify connectivity, initializing the pool if needed.
    ///
    /// Idempotent: once a pool exists this returns immediately without side
    /// effects. On first call it builds the pool, checks out one connection
    /// to verify the handshake, and releases it back.
    pub async fn ensure_ready(&self) -> GatewayResult<()> {
        self.pool().await.map(|_| ())
    }

    /// Get the shared pool, initializing it on first use.
    pub async fn pool(&self) -> GatewayResult<&MySqlPool> {
        self.pool
            .get_or_try_init(|| async {
                match self.connect_and_verify().await {
                    Ok(pool) => {
                        info!(
                            host = %self.config.host,
                            port = self.config.port,
                            database = %self.config.database,
                            max_connections = self.config.max_connections,
                            "Successfully connected to MySQL"
                        );
                        Ok(pool)
                    }
                    Err(e) => {
                        error!(error = %e, "Error connecting to MySQL");
                        Err(e)
                    }
                }
            })
            .await
    }

    /// Whether the pool has been successfully initialized.
    pub fn is_ready(&self) -> bool {
        self.pool.initialized()
    }

    /// Close the pool if it was ever created.
    pub async fn close(&self) {
        if let Some(pool) = self.pool.get() {
            pool.close().await;
            info!("Connection pool closed");
        }
    }

    async fn connect_and_verify(&self) -> GatewayResult<MySqlPool> {
        let options = MySqlConnectOptions::new()
            .host(&self.config.host)
            .port(self.config.port)
            .username(&self.config.user)
            .password(&self.config.password)
            .database(&self.config.database)
            .charset("utf8mb4");

        // connect_lazy_with defers the handshake; the acquire below is the
        // one verification round-trip, released immediately after.
        let pool = MySqlPoolOptions::new()
            .max_connections(self.config.max_connections)
            .acquire_timeout(Duration::from_secs(self.config.acquire_timeout_secs()))
            .connect_lazy_with(options);

        let conn = pool
            .acquire()
            .await
            .map_err(|e| GatewayError::connect(e.to_string()))?;
        drop(conn);

        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> PoolConfig {
        PoolConfig {
            host: "localhost".to_string(),
            port: 3306,
            user: "app".to_string(),
            password: String::new(),
            database: "shop".to_string(),
            max_connections: 10,
            acquire_queue_unbounded: true,
        }
    }

    #[test]
    fn test_manager_starts_uninitialized() {
        let manager = PoolManager::new(test_config());
        assert!(!manager.is_ready());
        assert_eq!(manager.config().database, "shop");
    }

    #[tokio::test]
    async fn test_close_without_init_is_noop() {
        let manager = PoolManager::new(test_config());
        manager.close().await;
        assert!(!manager.is_ready());
    }
}
