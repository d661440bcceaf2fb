//! Relative Strength Index over rolling mean gains/losses.
//!
//! avg_gain = rolling mean of positive deltas (negatives clamped to 0)
//! avg_loss = rolling mean of |negative deltas|, same window
//! rs = avg_gain / (avg_loss + 1e-6); RSI = 100 - 100 / (1 + rs)
//!
//! The first bar has no prior delta; it contributes zero gain and zero
//! loss, so RSI is defined from bar 0 but unreliable until `period` bars
//! have accumulated. A constant series pins RSI to exactly 0 (rs = 0).

use super::rolling::rolling_mean_min1;

/// Guards the rs division when the loss average is zero.
const RS_EPSILON: f64 = 1e-6;

/// RSI of a close series; output has the same length as the input.
pub fn compute_rsi(closes: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "RSI period must be >= 1");

    let n = closes.len();
    let mut gains = Vec::with_capacity(n);
    let mut losses = Vec::with_capacity(n);
    for i in 0..n {
        let delta = if i == 0 { 0.0 } else { closes[i] - closes[i - 1] };
        gains.push(delta.max(0.0));
        losses.push((-delta).max(0.0));
    }

    let avg_gain = rolling_mean_min1(&gains, period);
    let avg_loss = rolling_mean_min1(&losses, period);

    avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(&gain, &loss)| {
            let rs = gain / (loss + RS_EPSILON);
            100.0 - 100.0 / (1.0 + rs)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    #[test]
    fn same_length_as_input_and_defined_from_bar_zero() {
        let closes = [100.0, 101.0, 99.5, 102.0];
        let rsi = compute_rsi(&closes, 14);
        assert_eq!(rsi.len(), closes.len());
        assert!(rsi.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn constant_series_pins_zero() {
        let rsi = compute_rsi(&[50.0; 30], 14);
        for v in rsi {
            assert_approx(v, 0.0, 1e-12);
        }
    }

    #[test]
    fn all_gains_approach_one_hundred() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let rsi = compute_rsi(&closes, 14);
        // avg_loss is 0, so rs = gain / epsilon is enormous.
        assert!(*rsi.last().unwrap() > 99.9);
    }

    #[test]
    fn all_losses_stay_near_zero() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 - i as f64 * 0.5).collect();
        let rsi = compute_rsi(&closes, 14);
        assert!(*rsi.last().unwrap() < 0.1);
    }

    #[test]
    fn bounded_in_zero_one_hundred() {
        let closes: Vec<f64> = (0..60)
            .map(|i| 100.0 + (i as f64 * 1.3).sin() * 8.0 + (i as f64 * 0.31).cos() * 3.0)
            .collect();
        for v in compute_rsi(&closes, 14) {
            assert!((0.0..=100.0).contains(&v), "RSI out of bounds: {v}");
        }
    }

    #[test]
    fn uptrend_ends_above_fifty() {
        let closes: Vec<f64> = (0..50).map(|i| 100.0 + i as f64 * 0.8).collect();
        let rsi = compute_rsi(&closes, 14);
        assert!(*rsi.last().unwrap() > 50.0);
    }

    #[test]
    fn known_two_bar_value() {
        // Deltas: [0, +2]. period 2 → avg_gain = 1, avg_loss = 0.
        // rs = 1 / 1e-6, RSI = 100 - 100/(1 + 1e6) ≈ 99.9999
        let rsi = compute_rsi(&[100.0, 102.0], 2);
        assert_approx(rsi[1], 100.0 - 100.0 / (1.0 + 1.0 / 1e-6), 1e-9);
    }
}
