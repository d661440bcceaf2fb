//! Trading signals for the most recent bar of an analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Discrete trading recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalKind {
    Buy,
    Sell,
    Hold,
}

/// One recommendation for the latest bar, with the indicator readings that
/// produced it.
///
/// Signals are ephemeral: they are valued only for the bar they were
/// generated on, and nothing inside the core remembers them between calls.
/// Callers that need "is this new?" diffing keep their own previous result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub kind: SignalKind,
    /// Closing price of the bar the signal fired on.
    pub price: f64,
    pub timestamp: DateTime<Utc>,
    /// Human-readable rule summary, e.g.
    /// "RSI oversold + near support + MACD bullish".
    pub reason: String,
    /// RSI at the signal bar; `None` when the reading was undefined.
    pub rsi: Option<f64>,
    /// MACD at the signal bar; `None` when the reading was undefined.
    pub macd: Option<f64>,
    /// Volume at the signal bar.
    pub volume: Option<f64>,
}
