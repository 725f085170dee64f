//! Stock quote tool.
//!
//! Fetches the current price of one symbol from the chart endpoint and renders
//! price, change against the previous close, day range, volume and market cap.

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

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the stock quote tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StockQuoteParams {
    /// Ticker symbol.
    #[schemars(description = "Stock symbol (e.g. AAPL, PETR4.SA, VALE3.SA)")]
    pub symbol: String,

    /// Exchange the symbol trades on. Informational; the provider resolves the
    /// listing from the symbol alone.
    #[schemars(description = "Stock exchange (e.g. NASDAQ, B3, NYSE)")]
    #[serde(default = "default_exchange")]
    pub exchange: String,
}

fn default_exchange() -> String {
    "NASDAQ".to_string()
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Current quote for a single stock.
pub struct StockQuoteTool;

impl StockQuoteTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_stock_quote";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the current quote of a stock: price, change versus previous close, day high/low, volume and market cap.";

    /// Registry record for this tool.
    pub const ENTRY: ToolEntry = ToolEntry {
        name: Self::NAME,
        to_tool: Self::to_tool,
        invoke: Self::invoke,
    };

    /// Execute the tool logic.
    #[instrument(skip_all, fields(symbol = %params.symbol, exchange = %params.exchange))]
    pub async fn execute(
        params: &StockQuoteParams,
        client: &MarketClient,
    ) -> Result<String, ToolError> {
        info!("Stock quote tool called");
        let quote = client.quote(&params.symbol).await?;
        Ok(format::quote(&quote))
    }

    /// Parse raw call arguments and execute.
    pub fn invoke(
        arguments: serde_json::Value,
        client: Arc<MarketClient>,
    ) -> BoxFuture<'static, Result<String, ToolError>> {
        async move {
            let params: StockQuoteParams = parse_params(arguments)?;
            Self::execute(&params, &client).await
        }
        .boxed()
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<StockQuoteParams>(),
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
    fn test_params_default_exchange() {
        let params: StockQuoteParams = serde_json::from_str(r#"{"symbol": "AAPL"}"#).unwrap();
        assert_eq!(params.exchange, "NASDAQ");
    }

    #[test]
    fn test_schema_requires_symbol_only() {
        let tool = StockQuoteTool::to_tool();
        let required = tool.input_schema.get("required").unwrap();
        assert_eq!(required, &serde_json::json!(["symbol"]));
        let exchange = &tool.input_schema["properties"]["exchange"];
        assert_eq!(exchange["default"], "NASDAQ");
        assert_eq!(exchange["type"], "string");
    }
}
