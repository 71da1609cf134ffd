//! Schema-related data models.
//!
//! This module defines the record types produced by catalog introspection.

use serde::{Deserialize, Serialize};

/// One table as reported by `information_schema.TABLES`.
///
/// Sizes and row counts are estimates maintained by the storage engine, not
/// exact counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count_estimate: Option<u64>,
    /// Bytes (excluding indexes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_increment: Option<u64>,
}

impl TableSummary {
    /// Create a new table summary.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            engine: None,
            row_count_estimate: None,
            data_length: None,
            auto_increment: None,
        }
    }

    /// Set the storage engine.
    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = Some(engine.into());
        self
    }

    /// Set the estimated row count.
    pub fn with_row_count_estimate(mut self, rows: u64) -> Self {
        self.row_count_estimate = Some(rows);
        self
    }

    /// Set the data length in bytes.
    pub fn with_data_length(mut self, bytes: u64) -> Self {
        self.data_length = Some(bytes);
        self
    }

    /// Set the next auto-increment value.
    pub fn with_auto_increment(mut self, value: u64) -> Self {
        self.auto_increment = Some(value);
        self
    }
}

/// One column as reported by `SHOW COLUMNS FROM`.
///
/// Field names mirror the six columns of that statement's result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    /// Full column type, e.g. "varchar(255)" or "int unsigned"
    pub column_type: String,
    pub nullable: bool,
    /// Key flag: "PRI", "UNI", "MUL", or empty
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// e.g. "auto_increment", "on update CURRENT_TIMESTAMP"
    pub extra: String,
}
