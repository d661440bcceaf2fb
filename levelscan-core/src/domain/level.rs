//! Support/resistance levels extracted from swing points.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a level sits below price action (support) or above it (resistance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelKind {
    Support,
    Resistance,
}

/// A dated price level: the high of a swing peak (resistance) or the low of
/// a swing trough (support). Read-only once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SrLevel {
    pub kind: LevelKind,
    pub price: f64,
    /// The bar at which the extremum occurred.
    pub timestamp: DateTime<Utc>,
}
