//! Request-scoped market data entities.
//!
//! Each value is built once from a single upstream response, handed to the
//! formatter, and dropped. Fields the provider may omit are `Option`s so the
//! formatter can render them as unavailable instead of zero.

use chrono::{DateTime, Local};
use serde::Serialize;

/// Current quote for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockQuote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: Option<u64>,
    pub market_cap: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub open: Option<f64>,
    pub previous_close: f64,
    /// Upstream epoch seconds of the last trade.
    pub timestamp: Option<i64>,
}

impl StockQuote {
    /// Build a quote, deriving change and change percent from the previous close.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: String,
        name: String,
        price: f64,
        previous_close: f64,
        high: Option<f64>,
        low: Option<f64>,
        open: Option<f64>,
        volume: Option<u64>,
        market_cap: Option<f64>,
        timestamp: Option<i64>,
    ) -> Self {
        let (change, change_percent) = price_change(price, previous_close);
        Self {
            symbol,
            name,
            price,
            change,
            change_percent,
            volume,
            market_cap,
            high,
            low,
            open,
            previous_close,
            timestamp,
        }
    }
}

/// Absolute and percentage change from `base` to `current`.
///
/// The percentage is zero when `base` is zero rather than infinite.
pub fn price_change(current: f64, base: f64) -> (f64, f64) {
    let change = current - base;
    let percent = if base != 0.0 { change / base * 100.0 } else { 0.0 };
    (change, percent)
}

/// One row of a symbol search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub symbol: String,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
    pub exchange: Option<String>,
}

/// One OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBar {
    /// UTC calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<u64>,
}

/// Chronological price history, in upstream order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockHistory {
    pub symbol: String,
    pub period: String,
    pub interval: String,
    pub bars: Vec<PriceBar>,
}

impl StockHistory {
    /// Change from the first bar's close to the last bar's close, over the whole series.
    pub fn total_change(&self) -> Option<(f64, f64, f64, f64)> {
        let first = self.bars.first()?.close?;
        let last = self.bars.last()?.close?;
        let (change, percent) = price_change(last, first);
        Some((first, last, change, percent))
    }

    /// The most recent `n` bars, still in chronological order.
    pub fn tail(&self, n: usize) -> &[PriceBar] {
        let start = self.bars.len().saturating_sub(n);
        &self.bars[start..]
    }
}

/// Snapshot of one market index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexSnapshot {
    pub name: String,
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
}

/// Outcome of one index lookup during the market summary fan-out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum IndexOutcome {
    Ok(IndexSnapshot),
    Failed {
        symbol: String,
        name: String,
        reason: String,
    },
}

impl IndexOutcome {
    pub fn snapshot(&self) -> Option<&IndexSnapshot> {
        match self {
            Self::Ok(snapshot) => Some(snapshot),
            Self::Failed { .. } => None,
        }
    }
}

/// Index overview for one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSummary {
    pub region: String,
    pub indices: Vec<IndexOutcome>,
    /// Declared for clients of the type; no data path fills it yet.
    pub top_gainers: Vec<StockQuote>,
    /// Declared for clients of the type; no data path fills it yet.
    pub top_losers: Vec<StockQuote>,
    pub generated_at: DateTime<Local>,
}

impl MarketSummary {
    /// Snapshots of the indices that were fetched successfully, in catalog order.
    pub fn available(&self) -> impl Iterator<Item = &IndexSnapshot> {
        self.indices.iter().filter_map(IndexOutcome::snapshot)
    }
}

/// One news article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockNews {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub url: Option<String>,
    /// Upstream epoch seconds.
    pub published_at: Option<i64>,
    pub source: Option<String>,
}

/// Company profile and valuation figures.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StockFundamentals {
    pub symbol: String,
    pub name: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub employees: Option<u64>,
    pub website: Option<String>,
    pub market_cap: Option<f64>,
    pub pe: Option<f64>,
    pub peg: Option<f64>,
    pub eps: Option<f64>,
    pub book_value: Option<f64>,
    pub price_to_book: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub beta: Option<f64>,
    pub revenue: Option<f64>,
    pub profit_margin: Option<f64>,
    pub return_on_equity: Option<f64>,
    pub retrieved_at: Option<DateTime<Local>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> PriceBar {
        PriceBar {
            date: format!("2024-01-{day:02}"),
            open: Some(close),
            high: Some(close),
            low: Some(close),
            close: Some(close),
            volume: Some(100),
        }
    }

    #[test]
    fn test_quote_derives_change() {
        let quote = StockQuote::new(
            "AAPL".into(),
            "Apple Inc.".into(),
            150.25,
            148.0,
            None,
            None,
            None,
            None,
            None,
            None,
        );
        assert!((quote.change - 2.25).abs() < 1e-9);
        assert!((quote.change_percent - 1.5202702702).abs() < 1e-6);
    }

    #[test]
    fn test_price_change_zero_base() {
        assert_eq!(price_change(5.0, 0.0), (5.0, 0.0));
    }

    #[test]
    fn test_history_total_change_spans_full_series() {
        let history = StockHistory {
            symbol: "AAPL".into(),
            period: "1mo".into(),
            interval: "1d".into(),
            bars: (1..=15).map(|d| bar(d, 100.0 + d as f64)).collect(),
        };
        let (first, last, change, _) = history.total_change().unwrap();
        assert_eq!(first, 101.0);
        assert_eq!(last, 115.0);
        assert_eq!(change, 14.0);

        let tail = history.tail(10);
        assert_eq!(tail.len(), 10);
        assert_eq!(tail[0].date, "2024-01-06");
        assert_eq!(tail[9].date, "2024-01-15");
    }

    #[test]
    fn test_history_tail_shorter_than_window() {
        let history = StockHistory {
            symbol: "X".into(),
            period: "5d".into(),
            interval: "1d".into(),
            bars: (1..=3).map(|d| bar(d, 1.0)).collect(),
        };
        assert_eq!(history.tail(10).len(), 3);
    }

    #[test]
    fn test_summary_available_skips_failed() {
        let summary = MarketSummary {
            region: "US".into(),
            indices: vec![
                IndexOutcome::Ok(IndexSnapshot {
                    name: "S&P 500".into(),
                    symbol: "^GSPC".into(),
                    price: 1.0,
                    change: 0.0,
                    change_percent: 0.0,
                }),
                IndexOutcome::Failed {
                    symbol: "^RUT".into(),
                    name: "Russell 2000".into(),
                    reason: "timeout".into(),
                },
            ],
            top_gainers: Vec::new(),
            top_losers: Vec::new(),
            generated_at: Local::now(),
        };
        let symbols: Vec<_> = summary.available().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["^GSPC"]);
    }
}
