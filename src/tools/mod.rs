//! Tool-facing types and policy.
//!
//! This module contains what sits between the MCP dispatch surface and the
//! database layer:
//! - `guard`: read-only statement policy applied to the `query` tool
//! - `query`: input shape for the `query` tool
//! - `schema`: input shape for the `table-schema` tool

pub mod guard;
pub mod query;
pub mod schema;

pub use guard::{Verdict, classify, ensure_readonly};
pub use query::{QueryInput, QueryParamInput};
pub use schema::TableSchemaInput;
