//! Wire shapes of the upstream provider's JSON responses.
//!
//! Only the fields the formatter needs are declared; everything else in the
//! payload is ignored. Anything that may be missing upstream is an `Option`.

use serde::Deserialize;

// ============================================================================
// Chart endpoint (/v8/finance/chart/{symbol})
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<UpstreamError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    #[serde(default)]
    pub indicators: Option<Indicators>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub regular_market_price: Option<f64>,
    #[serde(default)]
    pub previous_close: Option<f64>,
    #[serde(default)]
    pub chart_previous_close: Option<f64>,
    #[serde(default)]
    pub regular_market_day_high: Option<f64>,
    #[serde(default)]
    pub regular_market_day_low: Option<f64>,
    #[serde(default)]
    pub regular_market_volume: Option<u64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub regular_market_time: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteSeries>,
}

/// Column-oriented OHLCV series. Cells are `null` for sessions without trades.
#[derive(Debug, Default, Deserialize)]
pub struct QuoteSeries {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpstreamError {
    pub fn message(&self) -> String {
        match (&self.code, &self.description) {
            (Some(code), Some(desc)) => format!("{code}: {desc}"),
            (None, Some(desc)) => desc.clone(),
            (Some(code), None) => code.clone(),
            (None, None) => "unknown upstream error".to_string(),
        }
    }
}

// ============================================================================
// Search endpoint (/v1/finance/search)
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub quotes: Vec<SearchQuote>,
    #[serde(default)]
    pub news: Vec<SearchNews>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuote {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, rename = "longname")]
    pub long_name: Option<String>,
    #[serde(default, rename = "shortname")]
    pub short_name: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub regular_market_price: Option<f64>,
    #[serde(default)]
    pub regular_market_change: Option<f64>,
    #[serde(default)]
    pub regular_market_change_percent: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchNews {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub provider_publish_time: Option<i64>,
    #[serde(default)]
    pub publisher: Option<String>,
}

// ============================================================================
// Quote summary endpoint (/v10/finance/quoteSummary/{symbol})
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResponse {
    pub quote_summary: QuoteSummaryEnvelope,
}

#[derive(Debug, Deserialize)]
pub struct QuoteSummaryEnvelope {
    #[serde(default)]
    pub result: Option<Vec<QuoteSummaryResult>>,
    #[serde(default)]
    pub error: Option<UpstreamError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResult {
    #[serde(default)]
    pub summary_profile: Option<SummaryProfile>,
    #[serde(default)]
    pub financial_data: Option<FinancialData>,
    #[serde(default)]
    pub default_key_statistics: Option<KeyStatistics>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryProfile {
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub full_time_employees: Option<Numeric>,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialData {
    #[serde(default)]
    pub market_cap: Option<Numeric>,
    #[serde(default)]
    pub total_revenue: Option<Numeric>,
    #[serde(default)]
    pub profit_margins: Option<Numeric>,
    #[serde(default)]
    pub return_on_equity: Option<Numeric>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStatistics {
    #[serde(default, rename = "trailingPE")]
    pub trailing_pe: Option<Numeric>,
    #[serde(default)]
    pub peg_ratio: Option<Numeric>,
    #[serde(default)]
    pub trailing_eps: Option<Numeric>,
    #[serde(default)]
    pub book_value: Option<Numeric>,
    #[serde(default)]
    pub price_to_book: Option<Numeric>,
    #[serde(default)]
    pub dividend_yield: Option<Numeric>,
    #[serde(default)]
    pub beta: Option<Numeric>,
}

/// A number that the provider sends either bare or wrapped as `{"raw": .., "fmt": ..}`.
///
/// An empty wrapper (`{}`) is how the provider reports a missing value.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Plain(f64),
    Wrapped {
        #[serde(default)]
        raw: Option<f64>,
    },
}

impl Numeric {
    /// The finite value, if any.
    pub fn value(self) -> Option<f64> {
        let v = match self {
            Self::Plain(v) => Some(v),
            Self::Wrapped { raw } => raw,
        };
        v.filter(|v| v.is_finite())
    }
}

/// Flatten an optional upstream number into an optional finite value.
pub fn numeric(value: Option<Numeric>) -> Option<f64> {
    value.and_then(Numeric::value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_accepts_plain_and_wrapped() {
        let stats: KeyStatistics = serde_json::from_str(
            r#"{"trailingPE": 28.5, "pegRatio": {"raw": 2.1, "fmt": "2.10"}, "beta": {}}"#,
        )
        .unwrap();
        assert_eq!(numeric(stats.trailing_pe), Some(28.5));
        assert_eq!(numeric(stats.peg_ratio), Some(2.1));
        assert_eq!(numeric(stats.beta), None);
        assert_eq!(numeric(stats.book_value), None);
    }

    #[test]
    fn test_chart_allows_null_cells() {
        let series: QuoteSeries =
            serde_json::from_str(r#"{"open": [1.0, null], "close": [null, 2.0], "volume": [null, 5]}"#)
                .unwrap();
        assert_eq!(series.open, vec![Some(1.0), None]);
        assert_eq!(series.close, vec![None, Some(2.0)]);
        assert_eq!(series.volume, vec![None, Some(5)]);
        assert!(series.high.is_empty());
    }

    #[test]
    fn test_upstream_error_message() {
        let err: UpstreamError =
            serde_json::from_str(r#"{"code": "Not Found", "description": "No data found"}"#)
                .unwrap();
        assert_eq!(err.message(), "Not Found: No data found");
    }
}
