//! MCP server implementation.
//!
//! The server handler implements the MCP protocol over a tool registry and
//! the shared Twitch session. Discovery serves the registry's catalog;
//! calls go through the dispatcher. Every failure - unknown tool, rejected
//! arguments, upstream API error - is returned as a failed tool-call result
//! with a single descriptive message, never as a protocol-level error.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, JsonObject, ListToolsResult,
        PaginatedRequestParam, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::config::Config;
use super::session::Session;
use crate::domains::tools::{CapabilityModule, ToolRegistry, dispatch, modules};

/// The main MCP server handler.
///
/// Cheap to clone: registry and session are shared. The registry is built
/// once here and never mutated, so concurrent tool calls resolve against it
/// without synchronization.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Aggregated tool catalog and dispatch map.
    registry: Arc<ToolRegistry>,

    /// Owner of the shared Helix client handle.
    session: Arc<Session>,
}

impl McpServer {
    /// Create a server exposing every built-in capability module.
    pub fn new(config: Config, session: Arc<Session>) -> Self {
        Self::with_modules(config, session, modules::all())
    }

    /// Create a server from an explicit module list (tests, embedding).
    pub fn with_modules(
        config: Config,
        session: Arc<Session>,
        modules: Vec<Box<dyn CapabilityModule>>,
    ) -> Self {
        let registry = Arc::new(ToolRegistry::build(&modules));
        info!(tools = registry.len(), "tool registry built");
        Self {
            config: Arc::new(config),
            registry,
            session,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// The session owning the shared client handle.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Run one tool call, folding every failure into an error result.
    async fn execute(&self, name: &str, arguments: JsonObject) -> CallToolResult {
        match dispatch(&self.registry, &self.session, name, arguments).await {
            Ok(content) => CallToolResult::success(content),
            Err(e) => {
                warn!(tool = name, error = %e, "tool call failed");
                CallToolResult::error(vec![Content::text(e.to_string())])
            }
        }
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools as plain JSON (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.registry
            .catalog()
            .iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let arguments = match arguments {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => JsonObject::new(),
            _ => return Err("Tool arguments must be a JSON object".to_string()),
        };

        let result = self.execute(name, arguments).await;
        Ok(serde_json::json!({
            "content": result.content,
            "isError": result.is_error.unwrap_or(false)
        }))
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Exposes the Twitch Helix API as tools: chat, moderation, polls, \
                 predictions, clips, streams, and more."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    #[instrument(skip_all)]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.registry.catalog().to_vec(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip_all, fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = request.arguments.unwrap_or_default();
        Ok(self.execute(&request.name, arguments).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CredentialsConfig;
    use rmcp::model::RawContent;

    fn test_server() -> McpServer {
        let session = Arc::new(Session::lazy(CredentialsConfig {
            client_id: Some("id".to_string()),
            client_secret: Some("secret".to_string()),
            access_token: Some("token".to_string()),
            refresh_token: Some("refresh".to_string()),
            token_file: None,
        }));
        McpServer::new(Config::default(), session)
    }

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            other => panic!("expected text content, got {:?}", other),
        }
    }

    #[test]
    fn test_server_exposes_all_tools() {
        let server = test_server();
        let tools = server.list_tools();
        assert_eq!(tools.len(), 50);
        let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
        assert!(names.contains(&"twitch_send_chat_message"));
        assert!(names.contains(&"twitch_ban_user"));
        assert!(names.contains(&"twitch_create_poll"));
        assert!(names.contains(&"twitch_check_user_subscription"));
    }

    #[test]
    fn test_unknown_tool_becomes_error_result() {
        let server = test_server();
        let result =
            tokio_test::block_on(server.execute("twitch_time_travel", JsonObject::new()));
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Unknown tool: twitch_time_travel");
    }

    #[test]
    fn test_bad_arguments_become_error_result() {
        let server = test_server();
        let result =
            tokio_test::block_on(server.execute("twitch_create_poll", JsonObject::new()));
        assert_eq!(result.is_error, Some(true));
        let message = text_of(&result);
        assert!(message.contains("twitch_create_poll"));
        assert!(message.contains("invalid arguments"));
    }
}
