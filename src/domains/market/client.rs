//! Upstream market data client.
//!
//! Every operation is one HTTP GET against the provider, except the market
//! summary, which fans out one chart request per region index and joins on all
//! of them. There is no caching and no retry: each call is a fresh round trip
//! bounded by the configured request timeout.

use chrono::{DateTime, Local};
use futures::future::join_all;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::error::{MarketError, MarketResult};
use super::indices::{index_name, region_indices};
use super::models::{
    IndexOutcome, IndexSnapshot, MarketSummary, PriceBar, SearchHit, StockFundamentals,
    StockHistory, StockNews, StockQuote, price_change,
};
use super::yahoo::{
    ChartResponse, ChartResult, QuoteSummaryResponse, QuoteSummaryResult, SearchResponse, numeric,
};
use crate::core::config::UpstreamConfig;

const CHART_PATH: [&str; 3] = ["v8", "finance", "chart"];
const SEARCH_PATH: [&str; 3] = ["v1", "finance", "search"];
const QUOTE_SUMMARY_PATH: [&str; 3] = ["v10", "finance", "quoteSummary"];
const FUNDAMENTAL_MODULES: &str = "summaryProfile,financialData,defaultKeyStatistics";

/// HTTP client for the upstream financial-data provider.
#[derive(Debug, Clone)]
pub struct MarketClient {
    http: reqwest::Client,
    base_url: Url,
}

impl MarketClient {
    /// Build a client from the upstream configuration.
    pub fn new(config: &UpstreamConfig) -> MarketResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| MarketError::client(format!("invalid base URL {}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(MarketError::client(format!(
                "base URL {} cannot carry a path",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| MarketError::client(e.to_string()))?;

        info!(
            "Market client ready: {} (timeout {}s)",
            base_url, config.timeout_secs
        );

        Ok(Self { http, base_url })
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Fetch the current quote for `symbol`.
    #[instrument(skip(self))]
    pub async fn quote(&self, symbol: &str) -> MarketResult<StockQuote> {
        const OP: &str = "quote";
        require_non_empty(OP, "symbol", symbol)?;

        let query = [
            ("region", "US"),
            ("lang", "en-US"),
            ("includePrePost", "false"),
            ("interval", "1m"),
            ("useYfid", "true"),
            ("range", "1d"),
            ("corsDomain", "finance.yahoo.com"),
            (".tsrc", "finance"),
        ];
        let chart = self.chart(OP, symbol, &query).await?;
        let meta = &chart.meta;

        let price = meta
            .regular_market_price
            .ok_or_else(|| missing(OP, symbol, "meta.regularMarketPrice"))?;
        let previous_close = meta
            .previous_close
            .or(meta.chart_previous_close)
            .ok_or_else(|| missing(OP, symbol, "meta.previousClose"))?;

        let open = chart
            .indicators
            .as_ref()
            .and_then(|i| i.quote.first())
            .and_then(|q| q.open.iter().flatten().next().copied());

        let name = meta
            .long_name
            .clone()
            .or_else(|| meta.short_name.clone())
            .unwrap_or_else(|| symbol.to_string());

        Ok(StockQuote::new(
            meta.symbol.clone().unwrap_or_else(|| symbol.to_string()),
            name,
            price,
            previous_close,
            meta.regular_market_day_high,
            meta.regular_market_day_low,
            open,
            meta.regular_market_volume,
            meta.market_cap,
            meta.regular_market_time,
        ))
    }

    /// Search for symbols matching `query`, returning at most `limit` hits.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str, limit: u32) -> MarketResult<Vec<SearchHit>> {
        const OP: &str = "search results";
        require_non_empty(OP, "query", query)?;

        let limit = limit.to_string();
        let params = [("q", query), ("quotesCount", limit.as_str()), ("newsCount", "0")];
        let url = self.endpoint(&SEARCH_PATH, None);
        let response: SearchResponse = self.get_json(OP, query, url, &params).await?;

        let hits = response
            .quotes
            .into_iter()
            .filter_map(|q| {
                Some(SearchHit {
                    symbol: q.symbol?,
                    name: q.long_name.or(q.short_name),
                    price: q.regular_market_price,
                    change: q.regular_market_change,
                    change_percent: q.regular_market_change_percent,
                    exchange: q.exchange,
                })
            })
            .collect();
        Ok(hits)
    }

    /// Fetch the OHLCV series of `symbol` over `period` sampled at `interval`.
    #[instrument(skip(self))]
    pub async fn history(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> MarketResult<StockHistory> {
        const OP: &str = "history";
        require_non_empty(OP, "symbol", symbol)?;

        let query = [
            ("region", "US"),
            ("lang", "en-US"),
            ("includePrePost", "false"),
            ("interval", interval),
            ("useYfid", "true"),
            ("range", period),
            ("corsDomain", "finance.yahoo.com"),
            (".tsrc", "finance"),
        ];
        let chart = self.chart(OP, symbol, &query).await?;

        let timestamps = chart.timestamp.unwrap_or_default();
        if timestamps.is_empty() {
            return Err(MarketError::fetch_failed(
                OP,
                symbol,
                format!("no price data for range {period} at interval {interval}"),
            ));
        }
        let series = chart
            .indicators
            .and_then(|i| i.quote.into_iter().next())
            .ok_or_else(|| missing(OP, symbol, "indicators.quote[0]"))?;

        let cell = |column: &[Option<f64>], i: usize| column.get(i).copied().flatten();
        let bars = timestamps
            .iter()
            .enumerate()
            .map(|(i, ts)| PriceBar {
                date: utc_date(*ts),
                open: cell(&series.open, i),
                high: cell(&series.high, i),
                low: cell(&series.low, i),
                close: cell(&series.close, i),
                volume: series.volume.get(i).copied().flatten(),
            })
            .collect();

        Ok(StockHistory {
            symbol: symbol.to_string(),
            period: period.to_string(),
            interval: interval.to_string(),
            bars,
        })
    }

    /// Snapshot the main indices of `region`.
    ///
    /// All index lookups run concurrently. A failed lookup becomes an
    /// [`IndexOutcome::Failed`] entry instead of failing the whole summary.
    #[instrument(skip(self))]
    pub async fn market_summary(&self, region: &str) -> MarketSummary {
        let symbols = region_indices(region);
        let lookups = symbols.iter().map(|symbol| async move {
            match self.index_snapshot(symbol).await {
                Ok(snapshot) => IndexOutcome::Ok(snapshot),
                Err(e) => {
                    warn!("Index lookup failed for {}: {}", symbol, e);
                    IndexOutcome::Failed {
                        symbol: symbol.to_string(),
                        name: index_name(symbol).to_string(),
                        reason: e.to_string(),
                    }
                }
            }
        });
        let indices = join_all(lookups).await;

        MarketSummary {
            region: region.to_string(),
            indices,
            top_gainers: Vec::new(),
            top_losers: Vec::new(),
            generated_at: Local::now(),
        }
    }

    /// Fetch up to `limit` news articles mentioning `symbol`.
    #[instrument(skip(self))]
    pub async fn news(&self, symbol: &str, limit: u32) -> MarketResult<Vec<StockNews>> {
        const OP: &str = "news";
        require_non_empty(OP, "symbol", symbol)?;

        let limit = limit.to_string();
        let params = [("q", symbol), ("quotesCount", "0"), ("newsCount", limit.as_str())];
        let url = self.endpoint(&SEARCH_PATH, None);
        let response: SearchResponse = self.get_json(OP, symbol, url, &params).await?;

        let articles = response
            .news
            .into_iter()
            .map(|n| StockNews {
                title: n.title,
                summary: n.summary,
                url: n.link,
                published_at: n.provider_publish_time,
                source: n.publisher,
            })
            .collect();
        Ok(articles)
    }

    /// Fetch profile and valuation figures for `symbol`.
    #[instrument(skip(self))]
    pub async fn fundamentals(&self, symbol: &str) -> MarketResult<StockFundamentals> {
        const OP: &str = "fundamentals";
        require_non_empty(OP, "symbol", symbol)?;

        let url = self.endpoint(&QUOTE_SUMMARY_PATH, Some(symbol));
        let params = [("modules", FUNDAMENTAL_MODULES)];
        let response: QuoteSummaryResponse = self.get_json(OP, symbol, url, &params).await?;

        let envelope = response.quote_summary;
        if let Some(err) = envelope.error {
            return Err(MarketError::fetch_failed(OP, symbol, err.message()));
        }
        let result = envelope
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| missing(OP, symbol, "quoteSummary.result[0]"))?;

        Ok(fundamentals_from(symbol, result))
    }

    // ========================================================================
    // Internals
    // ========================================================================

    async fn index_snapshot(&self, symbol: &str) -> MarketResult<IndexSnapshot> {
        const OP: &str = "index";
        let query = [
            ("region", "US"),
            ("lang", "en-US"),
            ("includePrePost", "false"),
            ("interval", "1d"),
            ("useYfid", "true"),
            ("range", "1d"),
        ];
        let chart = self.chart(OP, symbol, &query).await?;
        let meta = chart.meta;

        let price = meta
            .regular_market_price
            .ok_or_else(|| missing(OP, symbol, "meta.regularMarketPrice"))?;
        let previous_close = meta
            .previous_close
            .or(meta.chart_previous_close)
            .ok_or_else(|| missing(OP, symbol, "meta.previousClose"))?;
        let (change, change_percent) = price_change(price, previous_close);

        Ok(IndexSnapshot {
            name: index_name(symbol).to_string(),
            symbol: symbol.to_string(),
            price,
            change,
            change_percent,
        })
    }

    /// Fetch the first chart result for `symbol`, surfacing upstream chart errors.
    async fn chart(
        &self,
        operation: &'static str,
        symbol: &str,
        query: &[(&str, &str)],
    ) -> MarketResult<ChartResult> {
        let url = self.endpoint(&CHART_PATH, Some(symbol));
        let response: ChartResponse = self.get_json(operation, symbol, url, query).await?;

        if let Some(err) = response.chart.error {
            return Err(MarketError::fetch_failed(operation, symbol, err.message()));
        }
        response
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| missing(operation, symbol, "chart.result[0]"))
    }

    /// Build `base/<path..>/<symbol>` with the symbol percent-encoded as one segment.
    fn endpoint(&self, path: &[&str], symbol: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path);
            if let Some(symbol) = symbol {
                segments.push(symbol);
            }
        }
        url
    }

    /// Perform one GET and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        target: &str,
        url: Url,
        query: &[(&str, &str)],
    ) -> MarketResult<T> {
        debug!("GET {} {:?}", url, query);

        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                let message = if e.is_timeout() {
                    "request timed out".to_string()
                } else if e.is_connect() {
                    format!("connection failed: {e}")
                } else {
                    e.to_string()
                };
                MarketError::fetch_failed(operation, target, message)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketError::fetch_failed(
                operation,
                target,
                format!("HTTP status {status}"),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| MarketError::fetch_failed(operation, target, e.to_string()))?;

        debug!("Upstream response received: {} bytes", bytes.len());

        serde_json::from_slice(&bytes).map_err(|e| {
            MarketError::fetch_failed(operation, target, format!("unexpected response shape: {e}"))
        })
    }
}

fn require_non_empty(operation: &'static str, field: &str, value: &str) -> MarketResult<()> {
    if value.trim().is_empty() {
        return Err(MarketError::fetch_failed(
            operation,
            format!("<empty {field}>"),
            format!("{field} must not be empty"),
        ));
    }
    Ok(())
}

fn missing(operation: &'static str, target: &str, field: &str) -> MarketError {
    MarketError::fetch_failed(operation, target, format!("response is missing {field}"))
}

fn utc_date(epoch_secs: i64) -> String {
    DateTime::from_timestamp(epoch_secs, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| epoch_secs.to_string())
}

fn fundamentals_from(symbol: &str, result: QuoteSummaryResult) -> StockFundamentals {
    let profile = result.summary_profile.unwrap_or_default();
    let financial = result.financial_data.unwrap_or_default();
    let stats = result.default_key_statistics.unwrap_or_default();

    StockFundamentals {
        symbol: symbol.to_string(),
        name: profile.long_name,
        sector: profile.sector,
        industry: profile.industry,
        employees: numeric(profile.full_time_employees)
            .filter(|v| *v >= 0.0)
            .map(|v| v as u64),
        website: profile.website,
        market_cap: numeric(financial.market_cap),
        pe: numeric(stats.trailing_pe),
        peg: numeric(stats.peg_ratio),
        eps: numeric(stats.trailing_eps),
        book_value: numeric(stats.book_value),
        price_to_book: numeric(stats.price_to_book),
        dividend_yield: numeric(stats.dividend_yield),
        beta: numeric(stats.beta),
        revenue: numeric(financial.total_revenue),
        profit_margin: numeric(financial.profit_margins),
        return_on_equity: numeric(financial.return_on_equity),
        retrieved_at: Some(Local::now()),
    }
}
