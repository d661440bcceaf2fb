//! Serializable analysis configuration.

use serde::{Deserialize, Serialize};

/// Swing/level detection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SrConfig {
    /// Minimum bars between consecutive accepted swings. Lower-amplitude
    /// swings inside the exclusion window are suppressed in favor of
    /// higher ones.
    pub swing_min_separation: usize,

    /// Proximity tolerance for level clustering, as a fraction of price.
    /// Reserved: carried in configuration, while the signal generator keeps
    /// its fixed 1% proximity bands.
    pub price_tolerance: f64,

    /// Minimum touch count for a level to qualify. Accepted and currently
    /// ignored by level extraction; reserved for future clustering.
    pub min_touches: usize,
}

impl Default for SrConfig {
    fn default() -> Self {
        Self {
            swing_min_separation: 5,
            price_tolerance: 0.01,
            min_touches: 2,
        }
    }
}

/// Indicator engine parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    /// RSI rolling window, in bars.
    pub rsi_period: usize,
    /// Fast EMA span for MACD.
    pub macd_fast: usize,
    /// Slow EMA span for MACD.
    pub macd_slow: usize,
    /// EMA span of the MACD signal line.
    pub macd_signal: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}
