//! Helpers shared by the market data tools.

use futures::future::BoxFuture;
use rmcp::model::{CallToolResult, Content};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::warn;

use crate::domains::market::MarketClient;
use crate::domains::tools::ToolError;

/// Async entry point every tool exposes to the registry.
pub type InvokeFn =
    fn(serde_json::Value, Arc<MarketClient>) -> BoxFuture<'static, Result<String, ToolError>>;

/// Smallest accepted result limit.
pub const MIN_LIMIT: u32 = 1;

/// Largest accepted result limit.
pub const MAX_LIMIT: u32 = 100;

/// Default number of search results and news articles.
pub fn default_limit() -> f64 {
    10.0
}

/// Turn a caller-supplied limit into a result count.
///
/// Limits arrive as JSON numbers; the fraction is dropped and the value is
/// clamped to `MIN_LIMIT..=MAX_LIMIT`.
pub fn validate_limit(limit: f64) -> u32 {
    if limit.is_nan() {
        return default_limit() as u32;
    }
    limit.trunc().clamp(f64::from(MIN_LIMIT), f64::from(MAX_LIMIT)) as u32
}

/// Read tool arguments into a parameter struct.
///
/// A missing arguments object is treated as `{}` so that tools whose
/// parameters are all optional can be called bare.
pub fn parse_params<P: DeserializeOwned>(arguments: serde_json::Value) -> Result<P, ToolError> {
    let arguments = match arguments {
        serde_json::Value::Null => serde_json::Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Wrap rendered text in a single-element success envelope.
pub fn success_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

/// Wrap a failure in an error-flagged envelope naming the tool.
pub fn error_result(tool: &str, error: &ToolError) -> CallToolResult {
    let message = format!("Error executing {tool}: {error}");
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message)])
}
