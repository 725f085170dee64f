//! Text rendering of market data entities.
//!
//! Every function here is pure: one entity in, one markdown-flavoured text
//! block out. Values the provider did not supply render as [`NOT_AVAILABLE`],
//! never as zero.

use chrono::{DateTime, Local, TimeZone};

use super::models::{MarketSummary, SearchHit, StockFundamentals, StockHistory, StockNews, StockQuote};

/// Marker for a value the upstream provider did not supply.
pub const NOT_AVAILABLE: &str = "N/A";

/// Number of most recent bars shown in the history table.
pub const HISTORY_TABLE_ROWS: usize = 10;

const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// Formatters
// ============================================================================

/// Render a stock quote.
pub fn quote(q: &StockQuote) -> String {
    format!(
        "**Quote for {symbol}** ({name})\n\n\
         **Price:** {price}\n\
         **Change:** {change}\n\
         **Previous Close:** {previous_close}\n\
         **Open:** {open}\n\
         **Day High:** {high}\n\
         **Day Low:** {low}\n\
         **Volume:** {volume}\n\
         **Market Cap:** {market_cap}\n\
         **Last Updated:** {updated}",
        symbol = q.symbol,
        name = q.name,
        price = money(Some(q.price)),
        change = signed_change(q.change, q.change_percent),
        previous_close = money(Some(q.previous_close)),
        open = money(q.open),
        high = money(q.high),
        low = money(q.low),
        volume = grouped(q.volume),
        market_cap = billions(q.market_cap),
        updated = local_time(q.timestamp),
    )
}

/// Render symbol search results, numbered in upstream order.
pub fn search(query: &str, hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return format!("No stocks found for \"{query}\"");
    }

    let list = hits
        .iter()
        .enumerate()
        .map(|(i, hit)| {
            format!(
                "{n}. **{symbol}** - {name}\n   \
                 Price: {price}\n   \
                 Change: {change} ({percent}%)\n   \
                 Exchange: {exchange}\n",
                n = i + 1,
                symbol = hit.symbol,
                name = text(hit.name.as_deref()),
                price = money(hit.price),
                change = fixed(hit.change, 2),
                percent = fixed(hit.change_percent, 2),
                exchange = text(hit.exchange.as_deref()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("**Search results for \"{query}\":**\n\n{list}")
}

/// Render a price history.
///
/// The period summary spans the whole series; the table shows only the most
/// recent [`HISTORY_TABLE_ROWS`] bars in chronological order.
pub fn history(h: &StockHistory) -> String {
    let (first, last, change) = match h.total_change() {
        Some((first, last, change, percent)) => {
            (money(Some(first)), money(Some(last)), signed_change(change, percent))
        }
        None => (
            NOT_AVAILABLE.to_string(),
            NOT_AVAILABLE.to_string(),
            NOT_AVAILABLE.to_string(),
        ),
    };

    let tail = h.tail(HISTORY_TABLE_ROWS);
    let rows = tail
        .iter()
        .map(|bar| {
            format!(
                "{} | {} | {} | {} | {} | {}",
                bar.date,
                money(bar.open),
                money(bar.high),
                money(bar.low),
                money(bar.close),
                grouped(bar.volume),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "**Price history for {symbol} ({period}, interval {interval})**\n\n\
         **Period summary:**\n\
         Starting Price: {first}\n\
         Ending Price: {last}\n\
         Total Change: {change}\n\n\
         **Last {shown} of {total} data points:**\n\
         Date | Open | High | Low | Close | Volume\n\
         --- | --- | --- | --- | --- | ---\n\
         {rows}",
        symbol = h.symbol,
        period = h.period,
        interval = h.interval,
        shown = tail.len(),
        total = h.bars.len(),
    )
}

/// Render a market summary, listing only the indices that were fetched.
pub fn market_summary(s: &MarketSummary) -> String {
    let list = s
        .available()
        .map(|index| {
            format!(
                "**{} ({})**\nPrice: {:.2}\nChange: {}\n",
                index.name,
                index.symbol,
                index.price,
                signed_change(index.change, index.change_percent),
            )
        })
        .collect::<Vec<_>>();

    let body = if list.is_empty() {
        "No index data available.\n".to_string()
    } else {
        list.join("\n")
    };

    format!(
        "**Market Summary - {region}**\n\n\
         **Main Indices:**\n\n\
         {body}\n\
         **Updated at:** {updated}",
        region = s.region.to_uppercase(),
        updated = s.generated_at.format(DISPLAY_TIME_FORMAT),
    )
}

/// Render news articles, numbered in upstream order.
pub fn news(symbol: &str, articles: &[StockNews]) -> String {
    if articles.is_empty() {
        return format!("No news found for {symbol}");
    }

    let list = articles
        .iter()
        .enumerate()
        .map(|(i, a)| {
            let link = a
                .url
                .as_deref()
                .map(|url| format!("[Read more]({url})"))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            format!(
                "{n}. **{title}**\n   \
                 {summary}\n   \
                 {link}\n   \
                 Published: {published}\n   \
                 Source: {source}\n",
                n = i + 1,
                title = text(a.title.as_deref()),
                summary = text(a.summary.as_deref()),
                published = local_time(a.published_at),
                source = text(a.source.as_deref()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("**News about {symbol}:**\n\n{list}")
}

/// Render company fundamentals; every field falls back to [`NOT_AVAILABLE`] on its own.
pub fn fundamentals(f: &StockFundamentals) -> String {
    let updated = f
        .retrieved_at
        .map(|t| t.format(DISPLAY_TIME_FORMAT).to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    format!(
        "**Fundamentals for {symbol}**\n\n\
         **Company:**\n\
         Name: {name}\n\
         Sector: {sector}\n\
         Industry: {industry}\n\
         Employees: {employees}\n\
         Website: {website}\n\n\
         **Financials:**\n\
         Market Cap: {market_cap}\n\
         P/E Ratio: {pe}\n\
         PEG Ratio: {peg}\n\
         EPS: {eps}\n\
         Book Value: {book_value}\n\
         Price to Book: {price_to_book}\n\
         Dividend Yield: {dividend_yield}\n\
         Beta: {beta}\n\
         Revenue: {revenue}\n\
         Profit Margin: {profit_margin}\n\
         ROE: {roe}\n\n\
         **Updated at:** {updated}",
        symbol = f.symbol,
        name = text(f.name.as_deref()),
        sector = text(f.sector.as_deref()),
        industry = text(f.industry.as_deref()),
        employees = grouped(f.employees),
        website = text(f.website.as_deref()),
        market_cap = billions(f.market_cap),
        pe = fixed(f.pe, 2),
        peg = fixed(f.peg, 2),
        eps = fixed(f.eps, 2),
        book_value = fixed(f.book_value, 2),
        price_to_book = fixed(f.price_to_book, 2),
        dividend_yield = fixed(f.dividend_yield, 4),
        beta = fixed(f.beta, 2),
        revenue = billions(f.revenue),
        profit_margin = fixed(f.profit_margin, 4),
        roe = fixed(f.return_on_equity, 4),
    )
}

// ============================================================================
// Value helpers
// ============================================================================

fn text(value: Option<&str>) -> &str {
    value.filter(|s| !s.is_empty()).unwrap_or(NOT_AVAILABLE)
}

/// `value` with `decimals` fraction digits, or [`NOT_AVAILABLE`].
pub fn fixed(value: Option<f64>, decimals: usize) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{v:.decimals$}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Dollar amount with two decimals, e.g. `$150.25`.
pub fn money(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("${v:.2}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Dollar amount in billions, e.g. `$2.95B`.
pub fn billions(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("${:.2}B", v / 1e9),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Change with explicit sign and percentage, e.g. `+2.25 (1.52%)`.
pub fn signed_change(change: f64, percent: f64) -> String {
    let sign = if change >= 0.0 { "+" } else { "" };
    format!("{sign}{change:.2} ({percent:.2}%)")
}

/// Integer with thousands separators, e.g. `1,000,000`.
pub fn grouped(value: Option<u64>) -> String {
    let Some(value) = value else {
        return NOT_AVAILABLE.to_string();
    };
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Upstream epoch seconds as a local display time.
pub fn local_time(epoch_secs: Option<i64>) -> String {
    epoch_secs
        .and_then(|secs| Local.timestamp_opt(secs, 0).single())
        .map(|t: DateTime<Local>| t.format(DISPLAY_TIME_FORMAT).to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::market::models::{IndexOutcome, IndexSnapshot, PriceBar};

    fn sample_quote() -> StockQuote {
        StockQuote::new(
            "AAPL".into(),
            "Apple Inc.".into(),
            150.25,
            148.00,
            Some(151.00),
            Some(147.50),
            None,
            Some(1_000_000),
            None,
            Some(1_704_067_200),
        )
    }

    #[test]
    fn test_quote_rendering() {
        let text = quote(&sample_quote());
        assert!(text.contains("**Price:** $150.25"));
        assert!(text.contains("+2.25 (1.52%)"));
        assert!(text.contains("**Previous Close:** $148.00"));
        assert!(text.contains("**Day High:** $151.00"));
        assert!(text.contains("**Day Low:** $147.50"));
        assert!(text.contains("**Volume:** 1,000,000"));
        assert!(text.contains("**Market Cap:** N/A"));
        assert!(text.contains("**Open:** N/A"));
    }

    #[test]
    fn test_negative_change_has_no_plus() {
        assert_eq!(signed_change(-1.5, -0.75), "-1.50 (-0.75%)");
        assert_eq!(signed_change(0.0, 0.0), "+0.00 (0.00%)");
    }

    #[test]
    fn test_grouped() {
        assert_eq!(grouped(Some(0)), "0");
        assert_eq!(grouped(Some(999)), "999");
        assert_eq!(grouped(Some(1000)), "1,000");
        assert_eq!(grouped(Some(1_234_567)), "1,234,567");
        assert_eq!(grouped(None), "N/A");
    }

    #[test]
    fn test_numeric_helpers_never_render_nan() {
        assert_eq!(fixed(Some(f64::NAN), 2), "N/A");
        assert_eq!(money(Some(f64::INFINITY)), "N/A");
        assert_eq!(billions(Some(2_950_000_000_000.0)), "$2950.00B");
        assert_eq!(fixed(Some(0.0), 2), "0.00");
    }

    #[test]
    fn test_search_empty() {
        assert_eq!(search("zzzz", &[]), "No stocks found for \"zzzz\"");
    }

    #[test]
    fn test_search_numbering() {
        let hits = vec![
            SearchHit {
                symbol: "AAPL".into(),
                name: Some("Apple Inc.".into()),
                price: Some(150.25),
                change: Some(2.25),
                change_percent: Some(1.52),
                exchange: Some("NMS".into()),
            },
            SearchHit {
                symbol: "APLE".into(),
                name: None,
                price: None,
                change: None,
                change_percent: None,
                exchange: None,
            },
        ];
        let text = search("apple", &hits);
        assert!(text.contains("1. **AAPL** - Apple Inc."));
        assert!(text.contains("2. **APLE** - N/A"));
        assert!(text.contains("Change: N/A (N/A%)"));
    }

    #[test]
    fn test_history_table_is_last_ten_bars() {
        let bars = (1..=15)
            .map(|d| PriceBar {
                date: format!("2024-01-{d:02}"),
                open: Some(100.0),
                high: Some(100.0),
                low: Some(100.0),
                close: Some(100.0 + d as f64),
                volume: Some(1_500),
            })
            .collect();
        let h = StockHistory {
            symbol: "AAPL".into(),
            period: "1mo".into(),
            interval: "1d".into(),
            bars,
        };
        let text = history(&h);

        assert!(text.contains("Starting Price: $101.00"));
        assert!(text.contains("Ending Price: $115.00"));
        assert!(text.contains("Total Change: +14.00 (13.86%)"));
        assert!(text.contains("**Last 10 of 15 data points:**"));

        let rows: Vec<_> = text.lines().filter(|l| l.starts_with("2024-01-")).collect();
        assert_eq!(rows.len(), 10);
        assert!(rows[0].starts_with("2024-01-06"));
        assert!(rows[9].starts_with("2024-01-15"));
        assert!(rows[0].ends_with("| 1,500"));
    }

    #[test]
    fn test_summary_lists_only_successful_indices() {
        let ok = |name: &str, symbol: &str| {
            IndexOutcome::Ok(IndexSnapshot {
                name: name.into(),
                symbol: symbol.into(),
                price: 100.0,
                change: 1.0,
                change_percent: 1.0,
            })
        };
        let s = MarketSummary {
            region: "us".into(),
            indices: vec![
                ok("S&P 500", "^GSPC"),
                ok("Dow Jones", "^DJI"),
                ok("NASDAQ", "^IXIC"),
                IndexOutcome::Failed {
                    symbol: "^RUT".into(),
                    name: "Russell 2000".into(),
                    reason: "HTTP status 500".into(),
                },
            ],
            top_gainers: Vec::new(),
            top_losers: Vec::new(),
            generated_at: Local::now(),
        };
        let text = market_summary(&s);
        assert!(text.starts_with("**Market Summary - US**"));
        assert_eq!(text.matches("Price: ").count(), 3);
        assert!(text.contains("**S&P 500 (^GSPC)**"));
        assert!(!text.contains("Russell"));
    }

    #[test]
    fn test_news_rendering() {
        assert_eq!(news("AAPL", &[]), "No news found for AAPL");

        let articles = vec![StockNews {
            title: Some("Headline".into()),
            summary: None,
            url: Some("https://example.com/a".into()),
            published_at: None,
            source: Some("Reuters".into()),
        }];
        let text = news("AAPL", &articles);
        assert!(text.contains("1. **Headline**"));
        assert!(text.contains("[Read more](https://example.com/a)"));
        assert!(text.contains("Published: N/A"));
        assert!(text.contains("Source: Reuters"));

        let untitled = vec![StockNews {
            title: None,
            summary: None,
            url: None,
            published_at: None,
            source: None,
        }];
        let text = news("AAPL", &untitled);
        assert!(text.contains("1. **N/A**"));
        assert!(text.contains("   N/A\n   N/A\n"));
    }

    #[test]
    fn test_fundamentals_missing_fields_render_na() {
        let f = StockFundamentals {
            symbol: "AAPL".into(),
            sector: Some("Technology".into()),
            pe: Some(28.5),
            revenue: Some(383_290_000_000.0),
            dividend_yield: Some(0.0044),
            ..Default::default()
        };
        let text = fundamentals(&f);
        assert!(text.contains("Sector: Technology"));
        assert!(text.contains("P/E Ratio: 28.50"));
        assert!(text.contains("PEG Ratio: N/A"));
        assert!(text.contains("Revenue: $383.29B"));
        assert!(text.contains("Dividend Yield: 0.0044"));
        assert!(text.contains("Market Cap: N/A"));
        assert!(text.contains("Name: N/A"));
        assert!(!text.contains("NaN"));
    }
}
