//! In-process stand-in for the upstream provider, used by unit tests.

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::time::Duration;

use crate::core::config::UpstreamConfig;

/// First bar of the canned daily series: 2024-01-01T00:00:00Z.
pub const FIRST_BAR_EPOCH: i64 = 1_704_067_200;

/// Chart symbol whose response is held back for [`HANG_FOR`].
pub const HANGING_SYMBOL: &str = "HANG";

/// Longer than any timeout the tests configure.
pub const HANG_FOR: Duration = Duration::from_secs(5);

/// Serve canned upstream responses on an ephemeral local port; returns the base URL.
pub async fn spawn_upstream() -> String {
    let app = Router::new()
        .route("/v8/finance/chart/{symbol}", get(chart))
        .route("/v1/finance/search", get(search))
        .route("/v10/finance/quoteSummary/{symbol}", get(quote_summary));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Upstream configuration pointing at `base` that gives up after one second.
pub fn short_timeout_config(base: &str) -> UpstreamConfig {
    UpstreamConfig {
        timeout_secs: 1,
        ..upstream_config(base)
    }
}

/// Upstream configuration pointing at `base`.
pub fn upstream_config(base: &str) -> UpstreamConfig {
    UpstreamConfig {
        base_url: base.to_string(),
        timeout_secs: 5,
        ..UpstreamConfig::default()
    }
}

async fn chart(Path(symbol): Path<String>) -> Response {
    match symbol.as_str() {
        "AAPL" => Json(aapl_chart()).into_response(),
        "^GSPC" => Json(index_chart(5000.0, 4950.0)).into_response(),
        "^DJI" => Json(index_chart(38000.0, 38100.0)).into_response(),
        "^IXIC" => Json(index_chart(16000.0, 15900.0)).into_response(),
        "^RUT" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        HANGING_SYMBOL => {
            tokio::time::sleep(HANG_FOR).await;
            Json(aapl_chart()).into_response()
        }
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "chart": {
                    "result": null,
                    "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
                }
            })),
        )
            .into_response(),
    }
}

fn aapl_chart() -> Value {
    let closes: Vec<f64> = (0..15).map(|i| 101.0 + i as f64).collect();
    let opens: Vec<Value> = closes
        .iter()
        .enumerate()
        .map(|(i, c)| if i == 0 { Value::Null } else { json!(c - 0.5) })
        .collect();
    let timestamps: Vec<i64> = (0..15).map(|i| FIRST_BAR_EPOCH + i * 86_400).collect();

    json!({
        "chart": {
            "result": [{
                "meta": {
                    "symbol": "AAPL",
                    "longName": "Apple Inc.",
                    "regularMarketPrice": 150.25,
                    "previousClose": 148.00,
                    "regularMarketDayHigh": 151.00,
                    "regularMarketDayLow": 147.50,
                    "regularMarketVolume": 1000000,
                    "regularMarketTime": FIRST_BAR_EPOCH
                },
                "timestamp": timestamps,
                "indicators": {
                    "quote": [{
                        "open": opens,
                        "high": closes.iter().map(|c| c + 1.0).collect::<Vec<_>>(),
                        "low": closes.iter().map(|c| c - 1.0).collect::<Vec<_>>(),
                        "close": closes,
                        "volume": vec![2_000_000u64; 15]
                    }]
                }
            }],
            "error": null
        }
    })
}

fn index_chart(price: f64, previous_close: f64) -> Value {
    json!({
        "chart": {
            "result": [{
                "meta": {
                    "regularMarketPrice": price,
                    "chartPreviousClose": previous_close
                }
            }],
            "error": null
        }
    })
}

async fn search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let q = params.get("q").map(String::as_str).unwrap_or_default();
    let wants_quotes = params.get("quotesCount").is_some_and(|c| c != "0");
    let wants_news = params.get("newsCount").is_some_and(|c| c != "0");

    let quotes = if wants_quotes && q == "apple" {
        json!([
            {
                "symbol": "AAPL",
                "longname": "Apple Inc.",
                "shortname": "Apple",
                "exchange": "NMS",
                "regularMarketPrice": 150.25,
                "regularMarketChange": 2.25,
                "regularMarketChangePercent": 1.52
            },
            {"symbol": "APLE", "shortname": "Apple Hospitality"}
        ])
    } else {
        json!([])
    };

    let news = if wants_news && q == "AAPL" {
        json!([{
            "title": "Apple unveils new product",
            "link": "https://news.example.com/apple",
            "providerPublishTime": FIRST_BAR_EPOCH,
            "publisher": "Reuters"
        }])
    } else {
        json!([])
    };

    Json(json!({"quotes": quotes, "news": news}))
}

async fn quote_summary(
    Path(symbol): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let modules_ok = params
        .get("modules")
        .is_some_and(|m| m == "summaryProfile,financialData,defaultKeyStatistics");
    if symbol != "AAPL" || !modules_ok {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    }

    Json(json!({
        "quoteSummary": {
            "result": [{
                "summaryProfile": {
                    "sector": "Technology",
                    "industry": "Consumer Electronics",
                    "fullTimeEmployees": 161000,
                    "website": "https://www.apple.com"
                },
                "financialData": {
                    "totalRevenue": {"raw": 383285000000.0, "fmt": "383.29B"},
                    "profitMargins": {"raw": 0.25305, "fmt": "25.31%"},
                    "returnOnEquity": {}
                },
                "defaultKeyStatistics": {
                    "trailingPE": 28.5,
                    "pegRatio": {},
                    "beta": {"raw": 1.29, "fmt": "1.29"}
                }
            }],
            "error": null
        }
    }))
    .into_response()
}
