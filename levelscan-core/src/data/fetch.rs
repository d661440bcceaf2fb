//! Quote fetcher trait and the Yahoo Finance implementation.
//!
//! The [`QuoteFetcher`] trait abstracts over symbol-based market-data
//! lookup so the analysis pipeline never depends on a specific provider —
//! callers inject an implementation (or none, for file/in-memory sources)
//! and tests substitute canned tables.
//!
//! Yahoo has no official API and is subject to unannounced format changes;
//! the CSV path is the fallback when it misbehaves.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use super::table::{Cell, RawColumn, RawTable};

/// Errors from a quote fetch. Not retried by the core; the caller decides
/// whether to try again on its next refresh cycle.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("response format changed: {0}")]
    ResponseFormat(String),
}

/// Symbol-based market-data lookup.
///
/// `period` and `interval` use provider-style strings ("6mo", "1d", ...).
/// Implementations return the raw table exactly as fetched; normalization
/// happens downstream.
pub trait QuoteFetcher: Send + Sync {
    /// Human-readable name of this fetcher.
    fn name(&self) -> &str;

    /// Fetch OHLCV rows for `symbol` over `period` at `interval`.
    fn fetch(&self, symbol: &str, period: &str, interval: &str) -> Result<RawTable, FetchError>;
}

// ── Yahoo v8 chart API ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<f64>>,
}

/// Yahoo Finance quote fetcher over the v8 chart API.
pub struct YahooFetcher {
    client: reqwest::blocking::Client,
}

impl YahooFetcher {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");
        Self { client }
    }

    fn chart_url(symbol: &str, period: &str, interval: &str) -> String {
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{symbol}\
             ?range={period}&interval={interval}&includeAdjustedClose=false"
        )
    }

    /// Turn a parsed chart response into a raw table with a time index and
    /// one column per quote field. Null entries become missing cells; the
    /// normalizer drops those rows.
    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<RawTable, FetchError> {
        let result = resp.chart.result.ok_or_else(|| {
            if let Some(err) = resp.chart.error {
                if err.code == "Not Found" {
                    FetchError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    }
                } else {
                    FetchError::ResponseFormat(format!("{}: {}", err.code, err.description))
                }
            } else {
                FetchError::ResponseFormat("empty result with no error".into())
            }
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::ResponseFormat("result array is empty".into()))?;

        // A valid symbol with no bars in range comes back with no timestamps.
        let timestamps = data.timestamp.unwrap_or_default();
        let index: Vec<DateTime<Utc>> = timestamps
            .iter()
            .filter_map(|&ts| DateTime::from_timestamp(ts, 0))
            .collect();
        if index.len() != timestamps.len() {
            return Err(FetchError::ResponseFormat("out-of-range timestamp".into()));
        }

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::ResponseFormat("no quote data".into()))?;

        let n = index.len();
        let mut table = RawTable::with_index(index);
        for (name, values) in [
            ("open", quote.open),
            ("high", quote.high),
            ("low", quote.low),
            ("close", quote.close),
            ("volume", quote.volume),
        ] {
            if values.len() != n {
                return Err(FetchError::ResponseFormat(format!(
                    "{name} has {} entries for {n} timestamps",
                    values.len()
                )));
            }
            let cells = values
                .into_iter()
                .map(|v| match v {
                    Some(x) => Cell::Float(x),
                    None => Cell::Missing,
                })
                .collect();
            table.push_column(RawColumn::new(name, cells));
        }
        Ok(table)
    }
}

impl Default for YahooFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteFetcher for YahooFetcher {
    fn name(&self) -> &str {
        "yahoo"
    }

    fn fetch(&self, symbol: &str, period: &str, interval: &str) -> Result<RawTable, FetchError> {
        let url = Self::chart_url(symbol, period, interval);
        let resp: ChartResponse = self
            .client
            .get(&url)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?
            .json()
            .map_err(|e| FetchError::ResponseFormat(e.to_string()))?;
        Self::parse_response(symbol, resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canned_response(body: &str) -> ChartResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn parses_quote_arrays_with_nulls() {
        let resp = canned_response(
            r#"{"chart":{"result":[{"timestamp":[1700000000,1700086400,1700172800],
                "indicators":{"quote":[{
                    "open":[100.0,null,102.0],
                    "high":[101.0,102.0,103.0],
                    "low":[99.0,100.0,101.0],
                    "close":[100.5,101.5,102.5],
                    "volume":[1000.0,1100.0,null]}]}}],
                "error":null}}"#,
        );
        let table = YahooFetcher::parse_response("SPY", resp).unwrap();
        assert_eq!(table.height(), 3);
        assert_eq!(table.index.as_ref().unwrap().len(), 3);
        assert_eq!(*table.columns[0].cell(1), Cell::Missing);
        assert_eq!(*table.columns[4].cell(2), Cell::Missing);
        assert_eq!(*table.columns[3].cell(0), Cell::Float(100.5));
    }

    #[test]
    fn unknown_symbol_maps_to_symbol_not_found() {
        let resp = canned_response(
            r#"{"chart":{"result":null,
                "error":{"code":"Not Found","description":"No data found"}}}"#,
        );
        match YahooFetcher::parse_response("NOPE", resp) {
            Err(FetchError::SymbolNotFound { symbol }) => assert_eq!(symbol, "NOPE"),
            other => panic!("expected SymbolNotFound, got {other:?}"),
        }
    }

    #[test]
    fn missing_timestamps_yield_empty_table() {
        let resp = canned_response(
            r#"{"chart":{"result":[{"timestamp":null,
                "indicators":{"quote":[{"open":[],"high":[],"low":[],"close":[],"volume":[]}]}}],
                "error":null}}"#,
        );
        let table = YahooFetcher::parse_response("SPY", resp).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn length_mismatch_is_format_error() {
        let resp = canned_response(
            r#"{"chart":{"result":[{"timestamp":[1700000000,1700086400],
                "indicators":{"quote":[{
                    "open":[100.0],"high":[101.0],"low":[99.0],"close":[100.5],"volume":[1000.0]}]}}],
                "error":null}}"#,
        );
        assert!(matches!(
            YahooFetcher::parse_response("SPY", resp),
            Err(FetchError::ResponseFormat(_))
        ));
    }

    #[test]
    fn chart_url_carries_range_and_interval() {
        let url = YahooFetcher::chart_url("AAPL", "6mo", "1d");
        assert!(url.contains("/AAPL"));
        assert!(url.contains("range=6mo"));
        assert!(url.contains("interval=1d"));
    }
}
