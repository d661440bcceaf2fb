//! Indicator engine — RSI and MACD/signal-line over the closing price.
//!
//! All series are defined from the first bar (rolling windows degrade to
//! fewer observations, EMAs seed on the first close) and are statistically
//! unreliable inside the warm-up window. The engine never suppresses
//! early-window values; consumers decide what to trust.

pub mod ema;
pub mod macd;
pub mod rolling;
pub mod rsi;

pub use ema::ewm_mean;
pub use macd::compute_macd;
pub use rolling::rolling_mean_min1;
pub use rsi::compute_rsi;

use serde::Serialize;

use crate::config::IndicatorParams;
use crate::domain::{PriceBar, PriceSeries};

/// A price series augmented with per-bar RSI, MACD, and MACD signal-line
/// columns, all the same length as the series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorFrame {
    series: PriceSeries,
    rsi: Vec<f64>,
    macd: Vec<f64>,
    macd_signal: Vec<f64>,
}

impl IndicatorFrame {
    /// Compute all indicator columns for `series`.
    pub fn compute(series: PriceSeries, params: &IndicatorParams) -> Self {
        let closes = series.closes();
        let rsi = compute_rsi(&closes, params.rsi_period);
        let (macd, macd_signal) =
            compute_macd(&closes, params.macd_fast, params.macd_slow, params.macd_signal);
        Self {
            series,
            rsi,
            macd,
            macd_signal,
        }
    }

    /// Assemble a frame from precomputed columns. Column lengths must match
    /// the series.
    pub fn from_parts(
        series: PriceSeries,
        rsi: Vec<f64>,
        macd: Vec<f64>,
        macd_signal: Vec<f64>,
    ) -> Self {
        assert_eq!(rsi.len(), series.len(), "rsi column length mismatch");
        assert_eq!(macd.len(), series.len(), "macd column length mismatch");
        assert_eq!(
            macd_signal.len(),
            series.len(),
            "macd_signal column length mismatch"
        );
        Self {
            series,
            rsi,
            macd,
            macd_signal,
        }
    }

    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    pub fn rsi(&self) -> &[f64] {
        &self.rsi
    }

    pub fn macd(&self) -> &[f64] {
        &self.macd
    }

    pub fn macd_signal(&self) -> &[f64] {
        &self.macd_signal
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// The most recent bar with its indicator readings.
    pub fn last_row(&self) -> Option<(&PriceBar, f64, f64, f64)> {
        let bar = self.series.last()?;
        let i = self.series.len() - 1;
        Some((bar, self.rsi[i], self.macd[i], self.macd_signal[i]))
    }
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev close (or close for the first bar),
/// high = max(open, close) + 1.0, low = min(open, close) - 1.0,
/// volume = 1000.
#[cfg(test)]
pub fn make_series(closes: &[f64]) -> PriceSeries {
    use chrono::{TimeZone, Utc};
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                timestamp: Utc.timestamp_opt(1_700_000_000 + i as i64 * 86_400, 0).unwrap(),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect();
    PriceSeries::from_sorted_bars(bars)
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}
