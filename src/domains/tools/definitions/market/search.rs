//! Stock search tool.

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

/// Parameters for the stock search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchStocksParams {
    /// Free-text query.
    #[schemars(description = "Search term (company name or symbol)")]
    pub query: String,

    /// Maximum number of results to return.
    #[schemars(
        description = "Maximum number of results (default: 10). Fractions are dropped; values outside 1-100 are clamped.",
        range(min = 1, max = 100)
    )]
    #[serde(default = "default_limit")]
    pub limit: f64,
}

/// Symbol lookup by company name or ticker.
pub struct SearchStocksTool;

impl SearchStocksTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search_stocks";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Search stocks by company name or symbol. Returns matching symbols with price, change and exchange.";

    /// Registry record for this tool.
    pub const ENTRY: ToolEntry = ToolEntry {
        name: Self::NAME,
        to_tool: Self::to_tool,
        invoke: Self::invoke,
    };

    /// Execute the tool logic.
    #[instrument(skip_all, fields(query = %params.query, limit = params.limit))]
    pub async fn execute(
        params: &SearchStocksParams,
        client: &MarketClient,
    ) -> Result<String, ToolError> {
        info!("Stock search tool called");
        let hits = client
            .search(&params.query, validate_limit(params.limit))
            .await?;
        Ok(format::search(&params.query, &hits))
    }

    /// Parse raw call arguments and execute.
    pub fn invoke(
        arguments: serde_json::Value,
        client: Arc<MarketClient>,
    ) -> BoxFuture<'static, Result<String, ToolError>> {
        async move {
            let params: SearchStocksParams = parse_params(arguments)?;
            Self::execute(&params, &client).await
        }
        .boxed()
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SearchStocksParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
