//! Stock news tool.

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::{handler::server::tool::cached_schema_for_type, model::Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::super::common::{default_limit, parse_params, validate_limit};
use crate::domains::market::{MarketClient, format};
use crate::domains::tools::{ToolEntry, ToolError};

/// Parameters for the stock news tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StockNewsParams {
    #[schemars(description = "Stock symbol")]
    pub symbol: String,

    #[schemars(
        description = "Maximum number of articles (default: 10). Fractions are dropped; values outside 1-100 are clamped.",
        range(min = 1, max = 100)
    )]
    #[serde(default = "default_limit")]
    pub limit: f64,
}

/// Recent news articles about a stock.
pub struct StockNewsTool;

impl StockNewsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_stock_news";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get recent news articles related to a stock.";

    /// Registry record for this tool.
    pub const ENTRY: ToolEntry = ToolEntry {
        name: Self::NAME,
        to_tool: Self::to_tool,
        invoke: Self::invoke,
    };

    /// Execute the tool logic.
    #[instrument(skip_all, fields(symbol = %params.symbol, limit = params.limit))]
    pub async fn execute(
        params: &StockNewsParams,
        client: &MarketClient,
    ) -> Result<String, ToolError> {
        info!("Stock news tool called");
        let articles = client
            .news(&params.symbol, validate_limit(params.limit))
            .await?;
        Ok(format::news(&params.symbol, &articles))
    }

    /// Parse raw call arguments and execute.
    pub fn invoke(
        arguments: serde_json::Value,
        client: Arc<MarketClient>,
    ) -> BoxFuture<'static, Result<String, ToolError>> {
        async move {
            let params: StockNewsParams = parse_params(arguments)?;
            Self::execute(&params, &client).await
        }
        .boxed()
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<StockNewsParams>(),
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
    fn test_news_limit_accepts_any_number() {
        let params: StockNewsParams =
            parse_params(serde_json::json!({"symbol": "AAPL", "limit": 2.7})).unwrap();
        assert_eq!(validate_limit(params.limit), 2);

        let tool = StockNewsTool::to_tool();
        assert_eq!(tool.input_schema["properties"]["limit"]["type"], "number");
    }
}
