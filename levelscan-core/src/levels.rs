//! Level extraction — maps swing positions to typed, dated price levels.

use crate::domain::{LevelKind, PriceSeries, SrLevel};

/// Convert peak positions to resistance levels and trough positions to
/// support levels, ordered ascending by timestamp.
///
/// Positions index the series directly (the normalizer guarantees a
/// NaN-free series, so the compacted arrays from swing detection line up
/// with bar positions). The sort is stable; resistance entries precede
/// support entries at equal timestamps. No deduplication or clustering of
/// nearby prices happens here — `min_touches` in configuration is reserved
/// for that and currently ignored.
pub fn extract_levels(series: &PriceSeries, peaks: &[usize], troughs: &[usize]) -> Vec<SrLevel> {
    let bars = series.bars();
    let mut levels = Vec::with_capacity(peaks.len() + troughs.len());

    for &idx in peaks {
        let bar = &bars[idx];
        levels.push(SrLevel {
            kind: LevelKind::Resistance,
            price: bar.high,
            timestamp: bar.timestamp,
        });
    }
    for &idx in troughs {
        let bar = &bars[idx];
        levels.push(SrLevel {
            kind: LevelKind::Support,
            price: bar.low,
            timestamp: bar.timestamp,
        });
    }

    levels.sort_by_key(|level| level.timestamp);
    levels
}
