//! Query execution engine.
//!
//! The executor runs one statement per call against the shared pool and
//! normalizes everything the driver hands back into a `ResultEnvelope`.
//! Success is always a sequence of row-maps, regardless of what shape the
//! statement produced; failure is always an error envelope carrying the
//! driver's message. No driver fault propagates past this boundary.

use crate::db::pool::PoolManager;
use crate::db::types::RowToJson;
use crate::error::{GatewayError, GatewayResult};
use crate::models::{QueryParam, QueryRequest, ResultEnvelope, RowMap};
use sqlx::mysql::{MySqlArguments, MySqlRow};
use sqlx::MySqlPool;
use std::sync::Arc;
use tracing::{debug, error};

/// Runs parameterized statements against the pool.
pub struct QueryExecutor {
    pool_manager: Arc<PoolManager>,
}

impl QueryExecutor {
    /// Create a new executor backed by the shared pool.
    pub fn new(pool_manager: Arc<PoolManager>) -> Self {
        Self { pool_manager }
    }

    /// Execute a statement and return the normalized envelope.
    ///
    /// Initializes the pool on first use. A connection is borrowed for
    /// exactly this statement and returned on every exit path; if pool
    /// initialization fails, no acquisition happens at all.
    pub async fn execute(&self, request: &QueryRequest) -> ResultEnvelope {
        match self.try_execute(request).await {
            Ok(rows) => ResultEnvelope::ok(rows),
            Err(e) => {
                error!(error = %e, "Error executing query");
                ResultEnvelope::err(e.to_string())
            }
        }
    }

    async fn try_execute(&self, request: &QueryRequest) -> GatewayResult<Vec<RowMap>> {
        let pool = self.pool_manager.pool().await?;

        debug!(
            sql = %request.sql,
            params = request.params.len(),
            "Executing query"
        );

        let rows = fetch_rows(pool, &request.sql, &request.params).await?;
        Ok(rows.iter().map(RowToJson::to_json_map).collect())
    }
}

async fn fetch_rows(
    pool: &MySqlPool,
    sql: &str,
    params: &[QueryParam],
) -> GatewayResult<Vec<MySqlRow>> {
    // When params is empty, run raw SQL over the text protocol; some
    // statements (SHOW VARIANTS of EXPLAIN, etc.) reject server-side
    // preparation.
    if params.is_empty() {
        use sqlx::Executor;
        pool.fetch_all(sql).await.map_err(GatewayError::from)
    } else {
        let mut query = sqlx::query(sql);
        for param in params {
            query = bind_param(query, param);
        }
        query.fetch_all(pool).await.map_err(GatewayError::from)
    }
}

/// Bind a parameter through the driver's binding channel. Parameters are
/// never interpolated into statement text.
fn bind_param<'q>(
    query: sqlx::query::Query<'q, sqlx::MySql, MySqlArguments>,
    param: &'q QueryParam,
) -> sqlx::query::Query<'q, sqlx::MySql, MySqlArguments> {
    match param {
        QueryParam::Null => query.bind(None::<String>),
        QueryParam::Bool(v) => query.bind(*v),
        QueryParam::Int(v) => query.bind(*v),
        QueryParam::Float(v) => query.bind(*v),
        QueryParam::String(v) => query.bind(v.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PoolConfig;

    fn unreachable_manager() -> Arc<PoolManager> {
        // Bounded acquire mode so a test against a dead host fails fast
        // instead of queueing for the unbounded deadline.
        Arc::new(PoolManager::new(PoolConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            user: "nobody".to_string(),
            password: String::new(),
            database: "none".to_string(),
            max_connections: 1,
            acquire_queue_unbounded: false,
        }))
    }

    // start_paused keeps the pool's acquire backoff and deadline from
    // consuming wall-clock time while connecting to a dead port.
    #[tokio::test(start_paused = true)]
    async fn test_connect_failure_becomes_error_envelope() {
        let executor = QueryExecutor::new(unreachable_manager());
        let envelope = executor.execute(&QueryRequest::new("SELECT 1")).await;
        match envelope {
            ResultEnvelope::Err { message } => assert!(!message.is_empty()),
            ResultEnvelope::Ok { .. } => panic!("query against unreachable host succeeded"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_init_leaves_pool_retryable() {
        let manager = unreachable_manager();
        let executor = QueryExecutor::new(manager.clone());
        let _ = executor.execute(&QueryRequest::new("SELECT 1")).await;
        // A failed first initialization must not latch the readiness flag.
        assert!(!manager.is_ready());
    }
}
