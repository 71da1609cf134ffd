//! Schema introspection.
//!
//! Catalog queries for listing tables and describing columns. These
//! statements are constructed by the server, not by the caller, so they
//! bypass the read-only guard; the only caller-supplied fragment is the
//! table name, which goes through identifier quoting.

use crate::db::ident::quote_identifier;
use crate::db::pool::PoolManager;
use crate::error::GatewayResult;
use crate::models::{ColumnInfo, TableSummary};
use sqlx::mysql::MySqlRow;
use sqlx::Row;
use std::sync::Arc;
use tracing::debug;

mod queries {
    /// CONVERT(... USING utf8) guards against catalogs that report VARBINARY
    /// for name columns under some charset configurations.
    pub const LIST_TABLES: &str = r#"
        SELECT
            CONVERT(TABLE_NAME USING utf8) AS TABLE_NAME,
            CONVERT(ENGINE USING utf8) AS ENGINE,
            TABLE_ROWS,
            DATA_LENGTH,
            AUTO_INCREMENT
        FROM information_schema.TABLES
        WHERE TABLE_SCHEMA = ?
        "#;
}

/// Answers "list tables" and "describe table" from catalog metadata.
pub struct SchemaInspector {
    pool_manager: Arc<PoolManager>,
}

impl SchemaInspector {
    /// Create a new inspector backed by the shared pool.
    pub fn new(pool_manager: Arc<PoolManager>) -> Self {
        Self { pool_manager }
    }

    /// List all tables belonging to the configured database.
    ///
    /// The database name is value-bound; row counts and sizes are engine
    /// estimates.
    pub async fn list_tables(&self) -> GatewayResult<Vec<TableSummary>> {
        let pool = self.pool_manager.pool().await?;
        let database = &self.pool_manager.config().database;

        let rows = sqlx::query(queries::LIST_TABLES)
            .bind(database.as_str())
            .fetch_all(pool)
            .await?;

        let tables = rows
            .iter()
            .filter_map(|row| {
                let name = get_string(row, "TABLE_NAME");
                if name.is_empty() {
                    return None;
                }

                let mut table = TableSummary::new(&name);
                if let Some(engine) = get_optional_string(row, "ENGINE") {
                    if !engine.is_empty() {
                        table = table.with_engine(engine);
                    }
                }
                if let Some(count) = try_get_u64(row, "TABLE_ROWS") {
                    table = table.with_row_count_estimate(count);
                }
                if let Some(bytes) = try_get_u64(row, "DATA_LENGTH") {
                    table = table.with_data_length(bytes);
                }
                if let Some(next) = try_get_u64(row, "AUTO_INCREMENT") {
                    table = table.with_auto_increment(next);
                }

                Some(table)
            })
            .collect::<Vec<_>>();

        debug!(count = tables.len(), database = %database, "Listed tables");
        Ok(tables)
    }

    /// Describe one table's columns via `SHOW COLUMNS`.
    ///
    /// The table name sits in identifier position where parameter binding is
    /// not available, so it is backtick-quoted before interpolation.
    pub async fn describe_table(&self, table_name: &str) -> GatewayResult<Vec<ColumnInfo>> {
        use sqlx::Executor;

        let pool = self.pool_manager.pool().await?;
        let sql = format!("SHOW COLUMNS FROM {}", quote_identifier(table_name));

        let rows = pool.fetch_all(sql.as_str()).await?;

        let columns = rows
            .iter()
            .map(|row| ColumnInfo {
                name: get_string(row, "Field"),
                column_type: get_string(row, "Type"),
                nullable: get_string(row, "Null").eq_ignore_ascii_case("YES"),
                key: get_string(row, "Key"),
                default: get_optional_string(row, "Default"),
                extra: get_string(row, "Extra"),
            })
            .collect::<Vec<_>>();

        debug!(count = columns.len(), table = %table_name, "Described table");
        Ok(columns)
    }
}

/// Try to get a u64 value from a row, handling MySQL version differences.
/// MySQL 5.x may return BIGINT (i64), MySQL 8.x returns BIGINT UNSIGNED (u64).
fn try_get_u64(row: &MySqlRow, column: &str) -> Option<u64> {
    if let Ok(Some(v)) = row.try_get::<Option<u64>, _>(column) {
        return Some(v);
    }
    if let Ok(Some(v)) = row.try_get::<Option<i64>, _>(column) {
        return Some(v as u64);
    }
    None
}

/// Safely get a string from a MySQL row.
/// MySQL may return VARBINARY instead of VARCHAR depending on charset configuration.
fn get_string(row: &MySqlRow, column: &str) -> String {
    row.try_get::<String, _>(column)
        .ok()
        .or_else(|| {
            row.try_get::<Vec<u8>, _>(column)
                .ok()
                .and_then(|bytes| String::from_utf8(bytes).ok())
        })
        .unwrap_or_default()
}

/// Safely get an optional string from a MySQL row.
fn get_optional_string(row: &MySqlRow, column: &str) -> Option<String> {
    row.try_get::<Option<String>, _>(column)
        .ok()
        .flatten()
        .or_else(|| {
            row.try_get::<Option<Vec<u8>>, _>(column)
                .ok()
                .flatten()
                .and_then(|bytes| String::from_utf8(bytes).ok())
        })
}
