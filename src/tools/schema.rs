//! Input types for the schema tools.

use schemars::JsonSchema;
use serde::Deserialize;

/// Input for the table-schema tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TableSchemaInput {
    /// Name of the table to describe
    pub table: String,
}
