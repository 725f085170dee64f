//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tool registry.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! Each tool defines:
//! - Parameters struct (deserialized from the call arguments, schema via schemars)
//! - `execute()` method (core logic)
//! - `ENTRY` registry record (name, metadata, invoke function)
//!
//! `tools/list` and `tools/call` go through `ToolRegistry` on every transport,
//! so an unknown tool name still produces an error-flagged result instead of
//! a protocol error.

use rmcp::{ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::Result;
use crate::domains::market::MarketClient;
use crate::domains::tools::ToolRegistry;

const INSTRUCTIONS: &str = "Stock market data server. Use get_stock_quote for current prices, \
     search_stocks to find ticker symbols, get_stock_history for price history, \
     get_market_summary for the main indices of a region (US, BR, EU, ASIA), \
     get_stock_news for recent articles and get_stock_fundamentals for company metrics.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and routes
/// tool requests to the registry.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool catalog and dispatcher.
    tools: ToolRegistry,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Builds the upstream client once; it is shared by every tool call.
    pub fn new(config: Config) -> Result<Self> {
        let client = Arc::new(MarketClient::new(&config.upstream)?);

        Ok(Self {
            config: Arc::new(config),
            tools: ToolRegistry::new(client),
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Usage hint returned to clients on initialize.
    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        ToolRegistry::get_all_tools()
            .into_iter()
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
    ///
    /// Returns the serialized `CallToolResult`; tool failures are carried in
    /// its `isError` flag, not as an `Err`.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value> {
        let result = self.tools.call_tool(name, arguments).await;
        Ok(serde_json::to_value(result)?)
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: ToolRegistry::get_all_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip_all, fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let arguments = request
            .arguments
            .map(serde_json::Value::Object)
            .unwrap_or(serde_json::Value::Null);

        Ok(self.tools.call_tool(&request.name, arguments).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::market::testing::{spawn_upstream, upstream_config};
    use serde_json::json;

    async fn test_server() -> McpServer {
        let base = spawn_upstream().await;
        let config = Config {
            upstream: upstream_config(&base),
            ..Config::default()
        };
        McpServer::new(config).unwrap()
    }

    #[test]
    fn test_server_info_comes_from_config() {
        let mut config = Config::default();
        config.server.name = "custom-stock-server".to_string();
        let server = McpServer::new(config).unwrap();

        let info = server.get_info();
        assert_eq!(info.server_info.name, "custom-stock-server");
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
    }

    #[test]
    fn test_new_rejects_bad_upstream_url() {
        let mut config = Config::default();
        config.upstream.base_url = "::".to_string();
        assert!(matches!(
            McpServer::new(config),
            Err(crate::core::Error::Market(_))
        ));
    }

    #[test]
    fn test_http_tool_listing() {
        let server = McpServer::new(Config::default()).unwrap();
        let tools = server.list_tools();
        assert_eq!(tools.len(), 6);
        assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
    }

    #[tokio::test]
    async fn test_http_call_tool_serializes_envelope() {
        let server = test_server().await;

        let ok = server
            .call_tool("get_stock_quote", json!({"symbol": "AAPL"}))
            .await
            .unwrap();
        assert_eq!(ok["isError"], json!(false));
        assert_eq!(ok["content"][0]["type"], "text");
        assert!(ok["content"][0]["text"].as_str().unwrap().contains("$150.25"));

        let unknown = server.call_tool("nope", json!({})).await.unwrap();
        assert_eq!(unknown["isError"], json!(true));
        assert_eq!(
            unknown["content"][0]["text"],
            "Error executing nope: Unknown tool: nope"
        );
    }
}
