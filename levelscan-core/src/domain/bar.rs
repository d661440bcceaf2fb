//! PriceBar and PriceSeries — the canonical market data units.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Single OHLCV observation.
///
/// The usual OHLC relations (high >= open/close/low, low <= open/close) are
/// NOT enforced: upstream feeds ship inverted bars from time to time, and the
/// pipeline propagates them untouched rather than rejecting the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    /// True if any OHLCV field is non-finite.
    pub fn is_void(&self) -> bool {
        !self.open.is_finite()
            || !self.high.is_finite()
            || !self.low.is_finite()
            || !self.close.is_finite()
            || !self.volume.is_finite()
    }

    /// Basic OHLCV sanity check: high is the top of the bar, low the bottom.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }
}

/// Time-ordered OHLCV series: strictly increasing timestamps, no duplicates.
///
/// Produced by the normalizer (or [`PriceSeries::from_bars`], which applies
/// the same sort-and-dedupe step) and treated as immutable by every
/// downstream component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series from arbitrary bars: stable-sorts ascending by
    /// timestamp and keeps the first of any duplicate timestamp.
    pub fn from_bars(mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|b| b.timestamp);
        bars.dedup_by_key(|b| b.timestamp);
        Self { bars }
    }

    /// Wrap bars already known to be strictly increasing by timestamp.
    pub(crate) fn from_sorted_bars(bars: Vec<PriceBar>) -> Self {
        debug_assert!(
            bars.windows(2).all(|w| w[0].timestamp < w[1].timestamp),
            "bars must be strictly increasing by timestamp"
        );
        Self { bars }
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bar(ts_secs: i64, close: f64) -> PriceBar {
        PriceBar {
            timestamp: Utc.timestamp_opt(ts_secs, 0).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000.0,
        }
    }

    #[test]
    fn bar_is_sane() {
        assert!(bar(0, 100.0).is_sane());
    }

    #[test]
    fn bar_detects_void() {
        let mut b = bar(0, 100.0);
        b.open = f64::NAN;
        assert!(b.is_void());
        assert!(!b.is_sane());
    }

    #[test]
    fn bar_detects_inverted_high_low() {
        let mut b = bar(0, 100.0);
        b.high = b.low - 1.0;
        assert!(!b.is_sane());
    }

    #[test]
    fn from_bars_sorts_and_dedupes() {
        let series = PriceSeries::from_bars(vec![bar(300, 3.0), bar(100, 1.0), bar(100, 9.0)]);
        assert_eq!(series.len(), 2);
        // First occurrence of the duplicate timestamp is kept
        assert_eq!(series.bars()[0].close, 1.0);
        assert_eq!(series.bars()[1].close, 3.0);
    }

    #[test]
    fn bar_serialization_roundtrip() {
        let b = bar(86_400, 103.0);
        let json = serde_json::to_string(&b).unwrap();
        let deser: PriceBar = serde_json::from_str(&json).unwrap();
        assert_eq!(b, deser);
    }
}
