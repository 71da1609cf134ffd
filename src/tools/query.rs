//! Input types for the `query` tool.

use crate::models::{QueryParam, QueryRequest};
use schemars::JsonSchema;
use serde::Deserialize;

/// Input for the query tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QueryInput {
    /// SQL statement to execute. Only SELECT, SHOW, EXPLAIN and DESCRIBE
    /// statements are accepted.
    pub query: String,
    /// Positional parameters for parameterized queries (use ? placeholders in SQL)
    #[serde(default)]
    pub params: Vec<QueryParamInput>,
}

impl QueryInput {
    /// Convert into the executor's request shape.
    pub fn into_request(self) -> QueryRequest {
        QueryRequest {
            sql: self.query,
            params: self.params.into_iter().map(Into::into).collect(),
        }
    }
}

/// Input parameter that can be various JSON types.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum QueryParamInput {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Float value
    Float(f64),
    /// String value
    String(String),
}

impl From<QueryParamInput> for QueryParam {
    fn from(input: QueryParamInput) -> Self {
        match input {
            QueryParamInput::Null => QueryParam::Null,
            QueryParamInput::Bool(v) => QueryParam::Bool(v),
            QueryParamInput::Int(v) => QueryParam::Int(v),
            QueryParamInput::Float(v) => QueryParam::Float(v),
            QueryParamInput::String(v) => QueryParam::String(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_input_deserialization() {
        let json = r#"{
            "query": "SELECT * FROM users WHERE id = ?",
            "params": [42]
        }"#;

        let input: QueryInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.query, "SELECT * FROM users WHERE id = ?");
        assert_eq!(input.params.len(), 1);
    }

    #[test]
    fn test_params_default_empty() {
        let input: QueryInput = serde_json::from_str(r#"{"query": "SHOW TABLES"}"#).unwrap();
        assert!(input.params.is_empty());
    }

    #[test]
    fn test_into_request_converts_params() {
        let input: QueryInput =
            serde_json::from_str(r#"{"query": "SELECT ?", "params": [null, "x"]}"#).unwrap();
        let request = input.into_request();
        assert!(matches!(request.params[0], QueryParam::Null));
        assert!(matches!(request.params[1], QueryParam::String(_)));
    }
}
