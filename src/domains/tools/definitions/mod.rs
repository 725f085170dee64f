//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod common;
pub mod market;

pub use market::{
    MarketSummaryParams, MarketSummaryTool, SearchStocksParams, SearchStocksTool,
    StockFundamentalsParams, StockFundamentalsTool, StockHistoryParams, StockHistoryTool,
    StockNewsParams, StockNewsTool, StockQuoteParams, StockQuoteTool,
};
