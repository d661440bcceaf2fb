//! Analysis orchestrator — one call in, one atomic result out.
//!
//! Sequences normalize → (swings → levels), indicators → signals over a
//! single input series. Any stage failure aborts the whole call; a partial
//! (levels-only or indicators-only) result is never returned. The
//! orchestrator is synchronous and stateless across calls — concurrent
//! analyses need no coordination as long as each supplies its own source.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::config::{IndicatorParams, SrConfig};
use crate::data::{normalize, read_csv_table, FetchError, QuoteFetcher, RawTable, SchemaError};
use crate::domain::{Signal, SrLevel};
use crate::indicators::IndicatorFrame;
use crate::levels::extract_levels;
use crate::signals::generate_signals;
use crate::swings::detect_swings;

/// Data-source specification problems and fetch-side failures. Not retried
/// by the core; the caller may retry with corrected input or on its next
/// refresh cycle.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("no data source provided: set exactly one of table, csv_path, symbol")]
    MissingSource,

    #[error("ambiguous data source: set exactly one of table, csv_path, symbol")]
    AmbiguousSource,

    #[error("symbol source requires a quote fetcher")]
    MissingFetcher,

    #[error("failed to read csv '{path}': {reason}")]
    CsvRead { path: String, reason: String },

    #[error("fetch for '{symbol}' failed: {source}")]
    FetchFailed {
        symbol: String,
        #[source]
        source: FetchError,
    },

    #[error("fetch for '{symbol}' returned no rows")]
    EmptyFetch { symbol: String },
}

/// Any failure of an [`analyze`] call.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Symbol lookup parameters. `period`/`interval` default to "6mo"/"1d".
#[derive(Debug, Clone)]
pub struct SymbolQuery {
    pub symbol: String,
    pub period: Option<String>,
    pub interval: Option<String>,
}

impl SymbolQuery {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            period: None,
            interval: None,
        }
    }
}

/// One data-source specifier per request. All three slots are optional so
/// the zero-source and many-source failure modes stay representable;
/// [`analyze`] rejects anything but exactly one.
#[derive(Debug, Clone, Default)]
pub struct SourceSpec {
    /// Pre-loaded in-memory table.
    pub table: Option<RawTable>,
    /// CSV file on disk.
    pub csv_path: Option<PathBuf>,
    /// Symbol-based lookup through the injected fetcher.
    pub symbol: Option<SymbolQuery>,
}

impl SourceSpec {
    pub fn from_table(table: RawTable) -> Self {
        Self {
            table: Some(table),
            ..Self::default()
        }
    }

    pub fn from_csv(path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn from_symbol(query: SymbolQuery) -> Self {
        Self {
            symbol: Some(query),
            ..Self::default()
        }
    }
}

/// Everything one analysis call needs.
#[derive(Default)]
pub struct AnalyzeRequest<'a> {
    pub source: SourceSpec,
    pub config: SrConfig,
    pub params: IndicatorParams,
    /// Require volume confirmation for BUY/SELL.
    pub use_volume: bool,
    /// Quote fetcher for symbol sources; unused (and optional) otherwise.
    pub fetcher: Option<&'a dyn QuoteFetcher>,
}

/// The combined result of one analysis call.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Support/resistance levels, ascending by timestamp.
    pub levels: Vec<SrLevel>,
    /// The normalized series with indicator columns.
    pub frame: IndicatorFrame,
    /// Signals for the most recent bar; never empty.
    pub signals: Vec<Signal>,
}

/// Run the full pipeline over one data source.
pub fn analyze(request: AnalyzeRequest<'_>) -> Result<Analysis, AnalyzeError> {
    let table = resolve_source(&request)?;
    let series = normalize(&table)?;

    let (peaks, troughs) = detect_swings(&series, request.config.swing_min_separation);
    let levels = extract_levels(&series, &peaks, &troughs);

    let frame = IndicatorFrame::compute(series, &request.params);
    let signals = generate_signals(&frame, &levels, request.use_volume);

    Ok(Analysis {
        levels,
        frame,
        signals,
    })
}

/// Enforce the exactly-one-source rule and materialize the raw table.
fn resolve_source(request: &AnalyzeRequest<'_>) -> Result<RawTable, InputError> {
    let spec = &request.source;
    match (&spec.table, &spec.csv_path, &spec.symbol) {
        (None, None, None) => Err(InputError::MissingSource),

        (Some(table), None, None) => Ok(table.clone()),

        (None, Some(path), None) => read_csv_table(path).map_err(|e| InputError::CsvRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        }),

        (None, None, Some(query)) => {
            let fetcher = request.fetcher.ok_or(InputError::MissingFetcher)?;
            let period = query.period.as_deref().unwrap_or("6mo");
            let interval = query.interval.as_deref().unwrap_or("1d");
            let table = fetcher
                .fetch(&query.symbol, period, interval)
                .map_err(|source| InputError::FetchFailed {
                    symbol: query.symbol.clone(),
                    source,
                })?;
            if table.is_empty() {
                return Err(InputError::EmptyFetch {
                    symbol: query.symbol.clone(),
                });
            }
            Ok(table)
        }

        _ => Err(InputError::AmbiguousSource),
    }
}
