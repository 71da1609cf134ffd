//! MCP service implementation using rmcp.
//!
//! This is the single dispatch surface the transport calls into. It
//! registers the three tools (`query`, `table-schema`, `list-tables`) via
//! the rmcp tool router and serves the `table://{name}` resource space
//! through hand-written resource handlers.
//!
//! Every handler converts failure into a marked error payload before
//! returning; the transport always sees a well-formed response, never a
//! fault. The tool names, argument shapes, and the resource URI template
//! are the versioned surface of this server - renaming any of them is a
//! breaking change.

use crate::db::{PoolManager, QueryExecutor, SchemaInspector, quote_identifier};
use crate::models::{QueryRequest, ResultEnvelope, TABLE_RESOURCE_ROW_LIMIT};
use crate::tools::{QueryInput, TableSchemaInput, ensure_readonly};
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{
        AnnotateAble, CallToolResult, Content, Implementation, ListResourceTemplatesResult,
        ListResourcesResult, PaginatedRequestParam, ProtocolVersion, RawResource,
        RawResourceTemplate, ReadResourceRequestParam, ReadResourceResult, ResourceContents,
        ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Serialize a value to pretty-printed JSON and wrap it as a successful
/// tool result.
fn render_json<T: Serialize>(value: &T) -> CallToolResult {
    match serde_json::to_string_pretty(value) {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => CallToolResult::error(vec![Content::text(format!(
            "Internal error: failed to serialize response: {}",
            e
        ))]),
    }
}

/// Render an executor envelope as a tool result: rows as JSON text on
/// success, a marked error payload otherwise.
fn render_envelope(envelope: ResultEnvelope) -> CallToolResult {
    match envelope {
        ResultEnvelope::Ok { rows } => render_json(&rows),
        ResultEnvelope::Err { message } => {
            CallToolResult::error(vec![Content::text(format!("Error: {}", message))])
        }
    }
}

#[derive(Clone)]
pub struct MySqlService {
    /// Shared pool manager, also consulted for shutdown
    pool_manager: Arc<PoolManager>,
    executor: Arc<QueryExecutor>,
    inspector: Arc<SchemaInspector>,
    /// Tool router for MCP tool dispatch (auto-generated)
    tool_router: ToolRouter<Self>,
}

impl MySqlService {
    /// Create a new service over the shared pool.
    pub fn new(pool_manager: Arc<PoolManager>) -> Self {
        Self {
            executor: Arc::new(QueryExecutor::new(pool_manager.clone())),
            inspector: Arc::new(SchemaInspector::new(pool_manager.clone())),
            pool_manager,
            tool_router: Self::tool_router(),
        }
    }

    /// The pool manager this service runs on.
    pub fn pool_manager(&self) -> &Arc<PoolManager> {
        &self.pool_manager
    }
}

#[tool_router]
impl MySqlService {
    #[tool(
        name = "query",
        description = "Execute a read-only SQL query (SELECT, SHOW, EXPLAIN, DESCRIBE) and return rows as JSON.\nSupports positional ? parameters to keep values out of statement text."
    )]
    async fn query_tool(
        &self,
        params: Parameters<QueryInput>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.query(params).await)
    }

    #[tool(
        name = "table-schema",
        description = "Get the column definitions of one table: name, type, nullability, key, default, and extra flags."
    )]
    async fn table_schema_tool(
        &self,
        params: Parameters<TableSchemaInput>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.table_schema(params).await)
    }

    #[tool(
        name = "list-tables",
        description = "List all tables in the configured database with engine, estimated row count, data size, and auto-increment position."
    )]
    async fn list_tables_tool(&self) -> Result<CallToolResult, McpError> {
        Ok(self.list_tables().await)
    }
}

impl MySqlService {
    async fn query(&self, Parameters(input): Parameters<QueryInput>) -> CallToolResult {
        // Classify before anything touches the pool. Rejections come back as
        // a structured refusal, not a protocol fault.
        if let Err(refusal) = ensure_readonly(&input.query) {
            info!(query = %input.query, "Rejected non-read-only query");
            return CallToolResult::error(vec![Content::text(refusal.to_string())]);
        }

        render_envelope(self.executor.execute(&input.into_request()).await)
    }

    async fn table_schema(&self, Parameters(input): Parameters<TableSchemaInput>) -> CallToolResult {
        match self.inspector.describe_table(&input.table).await {
            Ok(columns) => render_json(&columns),
            Err(e) => CallToolResult::error(vec![Content::text(format!("Error: {}", e))]),
        }
    }

    async fn list_tables(&self) -> CallToolResult {
        match self.inspector.list_tables().await {
            Ok(tables) => render_json(&tables),
            Err(e) => CallToolResult::error(vec![Content::text(format!("Error: {}", e))]),
        }
    }
}

#[tool_handler]
impl ServerHandler for MySqlService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "mysql-mcp-server".to_owned(),
                title: Some("MySQL MCP Server".to_owned()),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Read-only MySQL access.\n\
                \n\
                ## Tools\n\
                - `query`: run a SELECT/SHOW/EXPLAIN/DESCRIBE statement; other statements are refused\n\
                - `list-tables`: list the tables of the configured database\n\
                - `table-schema`: column definitions for one table\n\
                \n\
                ## Resources\n\
                `table://{name}` samples up to 100 rows from a table.\n\
                \n\
                The read-only check is a keyword allow-list, not a parser; run the server \
                against a database account without write grants for real enforcement."
                    .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        // Enumerate the actual tables so clients can browse without knowing
        // names up front. Failure degrades to an empty listing; the template
        // below still advertises the URI shape.
        let tables = match self.inspector.list_tables().await {
            Ok(tables) => tables,
            Err(e) => {
                warn!(error = %e, "Failed to list tables for resources");
                Vec::new()
            }
        };

        let resources = tables
            .into_iter()
            .map(|t| {
                RawResource {
                    uri: format!("table://{}", t.name),
                    name: t.name.clone(),
                    title: Some(format!("Table: {}", t.name)),
                    description: t.row_count_estimate.map(|r| format!("~{} rows", r)),
                    mime_type: Some("application/json".to_string()),
                    size: None,
                    icons: None,
                    meta: None,
                }
                .no_annotation()
            })
            .collect();

        Ok(ListResourcesResult {
            meta: None,
            resources,
            next_cursor: None,
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        let templates = vec![
            RawResourceTemplate {
                uri_template: "table://{name}".to_string(),
                name: "table".to_string(),
                title: Some("Table contents".to_string()),
                description: Some(format!(
                    "First {} rows of a table",
                    TABLE_RESOURCE_ROW_LIMIT
                )),
                mime_type: Some("application/json".to_string()),
            }
            .no_annotation(),
        ];

        Ok(ListResourceTemplatesResult {
            meta: None,
            resource_templates: templates,
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let uri = &request.uri;

        let Some(name) = uri.strip_prefix("table://") else {
            return Err(McpError::resource_not_found(
                format!("Unknown resource URI: {}", uri),
                None,
            ));
        };

        // Server-constructed statement: the table name is identifier-quoted,
        // never value-bound, and the row cap is hard-coded.
        let sql = format!(
            "SELECT * FROM {} LIMIT {}",
            quote_identifier(name),
            TABLE_RESOURCE_ROW_LIMIT
        );

        let text = match self.executor.execute(&QueryRequest::new(sql)).await {
            ResultEnvelope::Ok { rows } => serde_json::to_string_pretty(&rows)
                .unwrap_or_else(|e| format!("Serialization error: {}", e)),
            ResultEnvelope::Err { message } => {
                format!("Error getting data from table {}: {}", name, message)
            }
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: uri.clone(),
                mime_type: Some("application/json".to_string()),
                text,
                meta: None,
            }],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PoolConfig;

    fn unreachable_service() -> MySqlService {
        // Bounded acquire mode so tests against a dead host hit the deadline
        // instead of queueing forever.
        MySqlService::new(Arc::new(PoolManager::new(PoolConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            user: "nobody".to_string(),
            password: String::new(),
            database: "none".to_string(),
            max_connections: 1,
            acquire_queue_unbounded: false,
        })))
    }

    #[test]
    fn test_server_info_advertises_tools_and_resources() {
        let service = unreachable_service();
        let info = service.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert_eq!(info.server_info.name, "mysql-mcp-server");
    }

    #[test]
    fn test_tool_names_are_the_versioned_surface() {
        let router = MySqlService::tool_router();
        let mut names: Vec<String> = router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["list-tables", "query", "table-schema"]);
    }

    #[tokio::test]
    async fn test_rejected_query_never_touches_the_pool() {
        let service = unreachable_service();
        let input: QueryInput =
            serde_json::from_str(r#"{"query": "DROP TABLE users"}"#).unwrap();

        let result = service.query(Parameters(input)).await;

        assert_eq!(result.is_error, Some(true));
        let rendered = format!("{:?}", result);
        assert!(rendered.contains("Only SELECT, SHOW, EXPLAIN and DESCRIBE"));
        // The refusal short-circuits before any pool initialization.
        assert!(!service.pool_manager().is_ready());
    }

    #[tokio::test(start_paused = true)]
    async fn test_query_failure_is_marked_error_payload() {
        let service = unreachable_service();
        let input: QueryInput = serde_json::from_str(r#"{"query": "SELECT 1"}"#).unwrap();

        let result = service.query(Parameters(input)).await;

        assert_eq!(result.is_error, Some(true));
        assert!(format!("{:?}", result).contains("Error:"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_table_resource_statement_and_failure_path() {
        let service = unreachable_service();

        // The resource handler builds exactly this statement for table://orders.
        let sql = format!(
            "SELECT * FROM {} LIMIT {}",
            quote_identifier("orders"),
            TABLE_RESOURCE_ROW_LIMIT
        );
        assert_eq!(sql, "SELECT * FROM `orders` LIMIT 100");

        let envelope = service.executor.execute(&QueryRequest::new(sql)).await;
        match envelope {
            ResultEnvelope::Err { message } => assert!(!message.is_empty()),
            ResultEnvelope::Ok { .. } => panic!("query against unreachable host succeeded"),
        }
    }
}
