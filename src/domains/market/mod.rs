//! Market data domain.
//!
//! - `client` - Upstream data client (one HTTP GET per operation)
//! - `format` - Pure text formatters for each entity
//! - `models` - Request-scoped entities built from upstream responses
//! - `yahoo` - Upstream wire shapes
//! - `indices` - Region index catalog for the market summary

mod client;
mod error;
pub mod format;
pub mod indices;
pub mod models;
mod yahoo;

#[cfg(test)]
pub(crate) mod testing;

pub use client::MarketClient;
pub use error::{MarketError, MarketResult};
pub use models::{
    IndexOutcome, IndexSnapshot, MarketSummary, PriceBar, SearchHit, StockFundamentals,
    StockHistory, StockNews, StockQuote,
};
