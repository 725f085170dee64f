//! Tool-specific error types.

use thiserror::Error;

use crate::domains::market::MarketError;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool is not in the registry.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The call arguments could not be read into the tool's parameters.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The upstream request behind the tool failed.
    #[error(transparent)]
    Fetch(#[from] MarketError),
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}
