//! Tool Registry - the static tool catalog and call dispatcher.
//!
//! This module provides:
//! - A fixed catalog mapping each tool name to its metadata and handler
//! - Tool metadata for `tools/list`
//! - Dispatch for `tools/call`, which never fails past this boundary: every
//!   error becomes an error-flagged content envelope

use std::sync::Arc;
use tracing::{info, instrument};

use rmcp::model::{CallToolResult, Tool};

use super::ToolError;
use super::definitions::common::{InvokeFn, error_result, success_result};
use super::definitions::{
    MarketSummaryTool, SearchStocksTool, StockFundamentalsTool, StockHistoryTool, StockNewsTool,
    StockQuoteTool,
};
use crate::domains::market::MarketClient;

// ============================================================================
// Tool Catalog
// ============================================================================

/// Registry record for one tool.
#[derive(Clone, Copy)]
pub struct ToolEntry {
    /// Tool name as registered in MCP.
    pub name: &'static str,

    /// Builds the tool's metadata (description and input schema).
    pub to_tool: fn() -> Tool,

    /// Parses the call arguments and runs the tool.
    pub invoke: InvokeFn,
}

impl std::fmt::Debug for ToolEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolEntry").field("name", &self.name).finish()
    }
}

static CATALOG: [ToolEntry; 6] = [
    StockQuoteTool::ENTRY,
    SearchStocksTool::ENTRY,
    StockHistoryTool::ENTRY,
    MarketSummaryTool::ENTRY,
    StockNewsTool::ENTRY,
    StockFundamentalsTool::ENTRY,
];

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - lists and dispatches the market data tools.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    client: Arc<MarketClient>,
}

impl ToolRegistry {
    /// Create a new tool registry backed by the given upstream client.
    pub fn new(client: Arc<MarketClient>) -> Self {
        Self { client }
    }

    /// All registry records, in catalog order.
    pub fn entries() -> &'static [ToolEntry] {
        &CATALOG
    }

    /// Look up a tool by name.
    pub fn find(name: &str) -> Option<&'static ToolEntry> {
        CATALOG.iter().find(|entry| entry.name == name)
    }

    /// Get all tool names.
    pub fn tool_names() -> Vec<&'static str> {
        CATALOG.iter().map(|entry| entry.name).collect()
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for `tools/list` on every transport.
    pub fn get_all_tools() -> Vec<Tool> {
        CATALOG.iter().map(|entry| (entry.to_tool)()).collect()
    }

    /// Dispatch a tool call.
    ///
    /// Unknown tools, unreadable arguments and upstream failures all come back
    /// as `Error executing <tool>: <message>` with the error flag set.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(&self, name: &str, arguments: serde_json::Value) -> CallToolResult {
        let Some(entry) = Self::find(name) else {
            return error_result(name, &ToolError::unknown_tool(name));
        };

        info!("Dispatching tool call");
        match (entry.invoke)(arguments, self.client.clone()).await {
            Ok(text) => success_result(text),
            Err(e) => error_result(name, &e),
        }
    }
}
