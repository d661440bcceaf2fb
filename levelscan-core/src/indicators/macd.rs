//! Moving Average Convergence Divergence.
//!
//! MACD = EMA(close, fast) - EMA(close, slow)
//! Signal = EMA(MACD, signal span)
//! Both series use the recursive first-observation-seeded EMA, so they are
//! defined from the first bar.

use super::ema::ewm_mean;

/// MACD line and signal line for a close series; both outputs have the same
/// length as the input.
pub fn compute_macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> (Vec<f64>, Vec<f64>) {
    let ema_fast = ewm_mean(closes, fast);
    let ema_slow = ewm_mean(closes, slow);
    let macd: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(&f, &s)| f - s)
        .collect();
    let signal_line = ewm_mean(&macd, signal);
    (macd, signal_line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    #[test]
    fn same_length_as_input() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let (macd, signal) = compute_macd(&closes, 12, 26, 9);
        assert_eq!(macd.len(), 40);
        assert_eq!(signal.len(), 40);
    }

    #[test]
    fn first_bar_is_zero_macd() {
        // Both EMAs seed at close[0], so the difference starts at 0.
        let (macd, signal) = compute_macd(&[100.0, 101.0, 102.0], 12, 26, 9);
        assert_approx(macd[0], 0.0, 1e-12);
        assert_approx(signal[0], 0.0, 1e-12);
    }

    #[test]
    fn uptrend_turns_macd_positive() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64 * 0.5).collect();
        let (macd, signal) = compute_macd(&closes, 12, 26, 9);
        assert!(*macd.last().unwrap() > 0.0);
        // The signal line lags the MACD line in a steady trend.
        assert!(macd.last().unwrap() > signal.last().unwrap() || {
            // After a long enough steady ramp both converge; accept equality margin.
            (macd.last().unwrap() - signal.last().unwrap()).abs() < 1e-6
        });
    }

    #[test]
    fn downtrend_turns_macd_negative() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 - i as f64 * 0.5).collect();
        let (macd, _) = compute_macd(&closes, 12, 26, 9);
        assert!(*macd.last().unwrap() < 0.0);
    }

    #[test]
    fn constant_series_is_flat_zero() {
        let (macd, signal) = compute_macd(&[42.0; 50], 12, 26, 9);
        for (m, s) in macd.iter().zip(&signal) {
            assert_approx(*m, 0.0, 1e-12);
            assert_approx(*s, 0.0, 1e-12);
        }
    }

    #[test]
    fn deterministic_across_runs() {
        let closes: Vec<f64> = (0..128).map(|i| 100.0 + (i as f64 * 0.4).sin() * 6.0).collect();
        let a = compute_macd(&closes, 12, 26, 9);
        let b = compute_macd(&closes, 12, 26, 9);
        assert_eq!(a, b);
    }
}
