//! Stock fundamentals tool.

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::{handler::server::tool::cached_schema_for_type, model::Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::super::common::parse_params;
use crate::domains::market::{MarketClient, format};
use crate::domains::tools::{ToolEntry, ToolError};

/// Parameters for the fundamentals tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StockFundamentalsParams {
    #[schemars(description = "Stock symbol")]
    pub symbol: String,
}

/// Company profile and valuation ratios.
pub struct StockFundamentalsTool;

impl StockFundamentalsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_stock_fundamentals";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get fundamental data of a stock: sector, industry, market cap, P/E, PEG, EPS, book value, dividend yield, beta, revenue, profit margin and ROE.";

    /// Registry record for this tool.
    pub const ENTRY: ToolEntry = ToolEntry {
        name: Self::NAME,
        to_tool: Self::to_tool,
        invoke: Self::invoke,
    };

    /// Execute the tool logic.
    #[instrument(skip_all, fields(symbol = %params.symbol))]
    pub async fn execute(
        params: &StockFundamentalsParams,
        client: &MarketClient,
    ) -> Result<String, ToolError> {
        info!("Stock fundamentals tool called");
        let fundamentals = client.fundamentals(&params.symbol).await?;
        Ok(format::fundamentals(&fundamentals))
    }

    /// Parse raw call arguments and execute.
    pub fn invoke(
        arguments: serde_json::Value,
        client: Arc<MarketClient>,
    ) -> BoxFuture<'static, Result<String, ToolError>> {
        async move {
            let params: StockFundamentalsParams = parse_params(arguments)?;
            Self::execute(&params, &client).await
        }
        .boxed()
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<StockFundamentalsParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
