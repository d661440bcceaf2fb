//! Swing detection — local maxima of the high series and local minima of
//! the low series under a minimum-separation constraint.
//!
//! Peak finding follows the classic rule: an interior sample strictly above
//! both neighbors is a peak, a flat run strictly above its surroundings
//! counts once at its midpoint, and the edges never qualify. The
//! minimum-distance pass then keeps peaks greedily from the highest down
//! (ties to the earliest index), suppressing lower peaks inside the
//! exclusion window.

use crate::domain::PriceSeries;

/// Locate swing highs and swing lows.
///
/// Non-finite values are dropped before detection, so the returned index
/// lists point into the compacted high/low arrays — alignment with the
/// original series is by position. A series shorter than
/// `2 * min_separation + 1` bars may yield zero swings; that is not an
/// error.
pub fn detect_swings(series: &PriceSeries, min_separation: usize) -> (Vec<usize>, Vec<usize>) {
    let highs: Vec<f64> = series.highs().into_iter().filter(|v| v.is_finite()).collect();
    let lows: Vec<f64> = series
        .lows()
        .into_iter()
        .filter(|v| v.is_finite())
        .map(|v| -v)
        .collect();

    let peaks = find_peaks(&highs, min_separation);
    let troughs = find_peaks(&lows, min_separation);
    (peaks, troughs)
}

/// Indices of local maxima of `values` at least `distance` bars apart.
pub fn find_peaks(values: &[f64], distance: usize) -> Vec<usize> {
    let candidates = local_maxima(values);
    enforce_min_distance(values, candidates, distance)
}

/// Plateau-aware interior local maxima: the midpoint of each flat top that
/// is strictly above both sides.
fn local_maxima(values: &[f64]) -> Vec<usize> {
    let n = values.len();
    if n < 3 {
        return Vec::new();
    }

    let mut peaks = Vec::new();
    let mut i = 1;
    let i_max = n - 1;
    while i < i_max {
        if values[i - 1] < values[i] {
            // Scan past a possible plateau.
            let mut ahead = i + 1;
            while ahead < i_max && values[ahead] == values[i] {
                ahead += 1;
            }
            if values[ahead] < values[i] {
                let left = i;
                let right = ahead - 1;
                peaks.push(left + (right - left) / 2);
                i = ahead;
                continue;
            }
        }
        i += 1;
    }
    peaks
}

/// Greedy selection in priority order: highest peak first, ties broken by
/// earliest index. A kept peak suppresses every candidate strictly closer
/// than `distance`.
fn enforce_min_distance(values: &[f64], peaks: Vec<usize>, distance: usize) -> Vec<usize> {
    if distance <= 1 || peaks.len() < 2 {
        return peaks;
    }

    let mut order: Vec<usize> = (0..peaks.len()).collect();
    order.sort_by(|&a, &b| {
        values[peaks[b]]
            .partial_cmp(&values[peaks[a]])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(peaks[a].cmp(&peaks[b]))
    });

    let mut keep = vec![true; peaks.len()];
    for &j in &order {
        if !keep[j] {
            continue;
        }
        // Suppress lower-priority neighbors on both sides.
        let mut k = j;
        while k > 0 {
            k -= 1;
            if peaks[j] - peaks[k] >= distance {
                break;
            }
            keep[k] = false;
        }
        for k in (j + 1)..peaks.len() {
            if peaks[k] - peaks[j] >= distance {
                break;
            }
            keep[k] = false;
        }
    }

    peaks
        .into_iter()
        .zip(keep)
        .filter_map(|(p, kept)| kept.then_some(p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PriceBar, PriceSeries};
    use chrono::{TimeZone, Utc};

    fn series_from_highs_lows(highs: &[f64], lows: &[f64]) -> PriceSeries {
        assert_eq!(highs.len(), lows.len());
        let bars = highs
            .iter()
            .zip(lows)
            .enumerate()
            .map(|(i, (&high, &low))| PriceBar {
                timestamp: Utc.timestamp_opt(1_700_000_000 + i as i64 * 86_400, 0).unwrap(),
                open: (high + low) / 2.0,
                high,
                low,
                close: (high + low) / 2.0,
                volume: 1000.0,
            })
            .collect();
        PriceSeries::from_sorted_bars(bars)
    }

    #[test]
    fn simple_interior_peak() {
        assert_eq!(find_peaks(&[1.0, 3.0, 1.0], 1), vec![1]);
    }

    #[test]
    fn edges_never_qualify() {
        assert_eq!(find_peaks(&[5.0, 1.0, 5.0], 1), Vec::<usize>::new());
    }

    #[test]
    fn plateau_peak_reports_midpoint() {
        // Flat top over indices 2..=4 → midpoint 3.
        assert_eq!(find_peaks(&[1.0, 2.0, 5.0, 5.0, 5.0, 2.0, 1.0], 1), vec![3]);
    }

    #[test]
    fn rising_plateau_is_not_a_peak() {
        assert_eq!(find_peaks(&[1.0, 2.0, 2.0, 3.0, 1.0], 1), vec![3]);
    }

    #[test]
    fn distance_keeps_the_higher_peak() {
        // Peaks at 1 (height 4) and 3 (height 6), 2 apart.
        let values = [1.0, 4.0, 2.0, 6.0, 1.0];
        assert_eq!(find_peaks(&values, 3), vec![3]);
        assert_eq!(find_peaks(&values, 2), vec![1, 3]);
    }

    #[test]
    fn equal_height_ties_keep_the_earliest() {
        let values = [1.0, 5.0, 2.0, 5.0, 1.0];
        assert_eq!(find_peaks(&values, 3), vec![1]);
    }

    #[test]
    fn accepted_peaks_respect_min_separation() {
        let values = [0.0, 3.0, 0.0, 4.0, 0.0, 5.0, 0.0, 4.5, 0.0, 3.5, 0.0];
        for distance in 1..6 {
            let peaks = find_peaks(&values, distance);
            for pair in peaks.windows(2) {
                assert!(pair[1] - pair[0] >= distance.max(1));
            }
        }
    }

    #[test]
    fn detects_peaks_and_troughs_independently() {
        let highs = [10.0, 12.0, 10.0, 9.0, 10.5, 9.5, 10.0];
        let lows = [8.0, 9.0, 7.0, 5.0, 7.5, 6.0, 8.0];
        let (peaks, troughs) = detect_swings(&series_from_highs_lows(&highs, &lows), 2);
        assert_eq!(peaks, vec![1, 4]);
        assert_eq!(troughs, vec![3, 5]);
    }

    #[test]
    fn peaks_and_troughs_are_disjoint_on_regular_bars() {
        // Highs and lows move together here, so a swing high never lands on
        // the same bar as a swing low.
        let highs: Vec<f64> = (0..60).map(|i| 102.0 + (i as f64 * 0.5).sin() * 5.0).collect();
        let lows: Vec<f64> = highs.iter().map(|h| h - 3.0).collect();
        let (peaks, troughs) = detect_swings(&series_from_highs_lows(&highs, &lows), 3);
        assert!(!peaks.is_empty());
        assert!(!troughs.is_empty());
        for p in &peaks {
            assert!(!troughs.contains(p), "peak and trough share index {p}");
        }
    }

    #[test]
    fn short_series_yields_no_swings() {
        let (peaks, troughs) = detect_swings(&series_from_highs_lows(&[10.0, 11.0], &[9.0, 9.5]), 5);
        assert!(peaks.is_empty());
        assert!(troughs.is_empty());
    }

    #[test]
    fn non_finite_values_are_compacted_before_detection() {
        let highs = [10.0, f64::NAN, 12.0, 10.0, 9.0];
        let lows = [9.0, 8.0, 9.0, 8.5, 8.0];
        let series = series_from_highs_lows(&highs, &lows);
        let (peaks, _) = detect_swings(&series, 1);
        // Compacted highs: [10, 12, 10, 9] → peak at compacted index 1.
        assert_eq!(peaks, vec![1]);
    }
}
