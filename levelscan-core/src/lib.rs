//! LevelScan Core — support/resistance levels and rule-based trading
//! signals from OHLCV series.
//!
//! The pipeline is strictly one-directional:
//! raw table → normalized series → {swings → levels, indicators} → signals.
//! No component mutates another's output after handoff, and every
//! `analyze` call is a pure function of (source snapshot, config,
//! parameters) — no shared state, caches, or locks inside the crate.
//!
//! - Domain types (bars, series, levels, signals)
//! - Raw-table normalization with duck-typed column resolution
//! - Swing detection with a minimum-separation constraint
//! - RSI and MACD/signal-line computation
//! - Rule-based signal generation for the most recent bar
//! - A single-entry orchestrator with a pluggable quote fetcher

pub mod analyze;
pub mod config;
pub mod data;
pub mod domain;
pub mod indicators;
pub mod levels;
pub mod signals;
pub mod swings;

pub use analyze::{
    analyze, Analysis, AnalyzeError, AnalyzeRequest, InputError, SourceSpec, SymbolQuery,
};
pub use config::{IndicatorParams, SrConfig};
pub use data::{
    normalize, read_csv_table, Cell, FetchError, QuoteFetcher, RawColumn, RawTable, SchemaError,
    YahooFetcher,
};
pub use domain::{LevelKind, PriceBar, PriceSeries, Signal, SignalKind, SrLevel};
pub use indicators::{compute_macd, compute_rsi, IndicatorFrame};
pub use levels::extract_levels;
pub use signals::generate_signals;
pub use swings::detect_swings;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: analysis inputs and outputs are Send + Sync, so
    /// callers can fan analyses out across threads without coordination.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::PriceBar>();
        require_sync::<domain::PriceBar>();
        require_send::<domain::PriceSeries>();
        require_sync::<domain::PriceSeries>();
        require_send::<domain::SrLevel>();
        require_sync::<domain::SrLevel>();
        require_send::<domain::Signal>();
        require_sync::<domain::Signal>();

        require_send::<config::SrConfig>();
        require_sync::<config::SrConfig>();
        require_send::<config::IndicatorParams>();
        require_sync::<config::IndicatorParams>();

        require_send::<data::RawTable>();
        require_sync::<data::RawTable>();
        require_send::<indicators::IndicatorFrame>();
        require_sync::<indicators::IndicatorFrame>();
        require_send::<analyze::Analysis>();
        require_sync::<analyze::Analysis>();
    }
}
