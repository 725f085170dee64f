//! Market data tools.
//!
//! One file per tool. Each tool pairs an upstream client operation with its
//! formatter and exposes a registry record (`ENTRY`).

pub mod fundamentals;
pub mod history;
pub mod news;
pub mod quote;
pub mod search;
pub mod summary;

pub use fundamentals::{StockFundamentalsParams, StockFundamentalsTool};
pub use history::{StockHistoryParams, StockHistoryTool};
pub use news::{StockNewsParams, StockNewsTool};
pub use quote::{StockQuoteParams, StockQuoteTool};
pub use search::{SearchStocksParams, SearchStocksTool};
pub use summary::{MarketSummaryParams, MarketSummaryTool};
