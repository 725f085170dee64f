//! Market data error types.

use thiserror::Error;

/// Result type for upstream market data operations.
pub type MarketResult<T> = Result<T, MarketError>;

/// Errors that can occur while talking to the upstream data provider.
#[derive(Debug, Error)]
pub enum MarketError {
    /// Transport failure, non-2xx status, or a response missing expected fields.
    #[error("Failed to fetch {operation} for {target}: {message}")]
    FetchFailed {
        operation: &'static str,
        target: String,
        message: String,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl MarketError {
    /// Create a new "fetch failed" error.
    pub fn fetch_failed(
        operation: &'static str,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::FetchFailed {
            operation,
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create a new client construction error.
    pub fn client(msg: impl Into<String>) -> Self {
        Self::Client(msg.into())
    }
}
