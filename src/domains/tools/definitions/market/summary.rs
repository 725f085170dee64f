//! Market summary tool.
//!
//! Fans out one lookup per index of the requested region; indices that fail
//! to load are left out of the rendered summary without failing the call.

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::{handler::server::tool::cached_schema_for_type, model::Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::super::common::parse_params;
use crate::domains::market::{MarketClient, format, indices::DEFAULT_REGION};
use crate::domains::tools::{ToolEntry, ToolError};

/// Parameters for the market summary tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MarketSummaryParams {
    #[schemars(description = "Market region (US, BR, EU, ASIA)")]
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

/// Snapshot of a region's main indices.
pub struct MarketSummaryTool;

impl MarketSummaryTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_market_summary";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get a market overview with the main indices of a region (US, BR, EU, ASIA).";

    /// Registry record for this tool.
    pub const ENTRY: ToolEntry = ToolEntry {
        name: Self::NAME,
        to_tool: Self::to_tool,
        invoke: Self::invoke,
    };

    /// Execute the tool logic.
    #[instrument(skip_all, fields(region = %params.region))]
    pub async fn execute(
        params: &MarketSummaryParams,
        client: &MarketClient,
    ) -> Result<String, ToolError> {
        info!("Market summary tool called");
        let summary = client.market_summary(&params.region).await;
        info!(
            "Market summary: {}/{} indices available",
            summary.available().count(),
            summary.indices.len()
        );
        Ok(format::market_summary(&summary))
    }

    /// Parse raw call arguments and execute.
    pub fn invoke(
        arguments: serde_json::Value,
        client: Arc<MarketClient>,
    ) -> BoxFuture<'static, Result<String, ToolError>> {
        async move {
            let params: MarketSummaryParams = parse_params(arguments)?;
            Self::execute(&params, &client).await
        }
        .boxed()
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<MarketSummaryParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_params_default_region() {
        let params: MarketSummaryParams = parse_params(serde_json::Value::Null).unwrap();
        assert_eq!(params.region, "US");
    }

    #[test]
    fn test_schema_has_no_required_params() {
        let tool = MarketSummaryTool::to_tool();
        let required = tool
            .input_schema
            .get("required")
            .and_then(|r| r.as_array())
            .map(|r| r.len())
            .unwrap_or(0);
        assert_eq!(required, 0);
    }
}
