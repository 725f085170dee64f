//! Stock price history tool.

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

/// Parameters for the price history tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StockHistoryParams {
    #[schemars(description = "Stock symbol")]
    pub symbol: String,

    #[schemars(description = "History period (1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max)")]
    #[serde(default = "default_period")]
    pub period: String,

    #[schemars(
        description = "Data interval (1m, 2m, 5m, 15m, 30m, 60m, 90m, 1h, 1d, 5d, 1wk, 1mo, 3mo)"
    )]
    #[serde(default = "default_interval")]
    pub interval: String,
}

fn default_period() -> String {
    "1mo".to_string()
}

fn default_interval() -> String {
    "1d".to_string()
}

/// OHLCV history with a period summary.
pub struct StockHistoryTool;

impl StockHistoryTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_stock_history";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the price history of a stock over a period. Summarises the change over the whole period and tabulates the 10 most recent data points.";

    /// Registry record for this tool.
    pub const ENTRY: ToolEntry = ToolEntry {
        name: Self::NAME,
        to_tool: Self::to_tool,
        invoke: Self::invoke,
    };

    /// Execute the tool logic.
    #[instrument(skip_all, fields(symbol = %params.symbol, period = %params.period, interval = %params.interval))]
    pub async fn execute(
        params: &StockHistoryParams,
        client: &MarketClient,
    ) -> Result<String, ToolError> {
        info!("Stock history tool called");
        let history = client
            .history(&params.symbol, &params.period, &params.interval)
            .await?;
        Ok(format::history(&history))
    }

    /// Parse raw call arguments and execute.
    pub fn invoke(
        arguments: serde_json::Value,
        client: Arc<MarketClient>,
    ) -> BoxFuture<'static, Result<String, ToolError>> {
        async move {
            let params: StockHistoryParams = parse_params(arguments)?;
            Self::execute(&params, &client).await
        }
        .boxed()
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<StockHistoryParams>(),
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
    fn test_history_params_defaults() {
        let params: StockHistoryParams = serde_json::from_str(r#"{"symbol": "MSFT"}"#).unwrap();
        assert_eq!(params.period, "1mo");
        assert_eq!(params.interval, "1d");
    }
}
