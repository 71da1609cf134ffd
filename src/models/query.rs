//! Query-related data models.
//!
//! This module defines the request and result envelope types shared by the
//! query executor and the tool handlers.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Hard cap on rows returned by the `table://{name}` resource.
pub const TABLE_RESOURCE_ROW_LIMIT: u32 = 100;

/// A row as returned to callers: column name to scalar JSON value.
pub type RowMap = serde_json::Map<String, JsonValue>;

/// A parameter value for parameterized queries.
///
/// Parameters always travel through the driver's binding channel; they are
/// never interpolated into statement text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryParam {
    /// NULL value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (stored as i64 for maximum range)
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
}

impl QueryParam {
    /// Check if this parameter is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the type name of this parameter for debugging.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
        }
    }
}

/// A single statement to run against the pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub sql: String,
    #[serde(default)]
    pub params: Vec<QueryParam>,
}

impl QueryRequest {
    /// Create a new query request with no parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Add a parameter to this query.
    pub fn with_param(mut self, param: QueryParam) -> Self {
        self.params.push(param);
        self
    }
}

/// The uniform success/error wrapper returned by every executor operation.
///
/// Success always carries a sequence of row-maps, never a bare scalar or a
/// single object, so downstream consumers never branch on cardinality.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResultEnvelope {
    Ok { rows: Vec<RowMap> },
    Err { message: String },
}

impl ResultEnvelope {
    /// Wrap a row sequence in a success envelope.
    pub fn ok(rows: Vec<RowMap>) -> Self {
        Self::Ok { rows }
    }

    /// Wrap a failure message in an error envelope.
    pub fn err(message: impl Into<String>) -> Self {
        Self::Err {
            message: message.into(),
        }
    }

    /// Check if this envelope is a success.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}
