//! Database access layer.
//!
//! This module provides database access functionality:
//! - Connection pool lifecycle
//! - Query execution and result normalization
//! - Schema introspection
//! - Type mappings and identifier quoting

pub mod executor;
pub mod ident;
pub mod pool;
pub mod schema;
pub mod types;

pub use executor::QueryExecutor;
pub use ident::quote_identifier;
pub use pool::PoolManager;
pub use schema::SchemaInspector;
