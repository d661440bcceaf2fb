//! Exponentially-weighted mean, recursive (non-adjusted) form.
//!
//! ema[0] = x[0]; ema[t] = alpha * x[t] + (1 - alpha) * ema[t-1]
//! with alpha = 2 / (span + 1). Seeded by the first observation, so the
//! series is defined from the first bar onward — statistically unreliable
//! until roughly `span` bars have elapsed, which is the caller's problem,
//! not a gap.

/// Recursive EMA of `values` over `span`.
pub fn ewm_mean(values: &[f64], span: usize) -> Vec<f64> {
    assert!(span >= 1, "EMA span must be >= 1");

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev = f64::NAN;
    for (i, &v) in values.iter().enumerate() {
        let ema = if i == 0 { v } else { alpha * v + (1.0 - alpha) * prev };
        out.push(ema);
        prev = ema;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    #[test]
    fn seeded_by_first_observation() {
        let out = ewm_mean(&[10.0, 11.0, 12.0], 3);
        // alpha = 0.5: 10, 0.5*11 + 0.5*10 = 10.5, 0.5*12 + 0.5*10.5 = 11.25
        assert_approx(out[0], 10.0, 1e-12);
        assert_approx(out[1], 10.5, 1e-12);
        assert_approx(out[2], 11.25, 1e-12);
    }

    #[test]
    fn span_one_tracks_input_exactly() {
        let values = [3.0, 1.0, 4.0, 1.5];
        assert_eq!(ewm_mean(&values, 1), values.to_vec());
    }

    #[test]
    fn constant_input_stays_constant() {
        let out = ewm_mean(&[7.0; 50], 12);
        for v in out {
            assert_approx(v, 7.0, 1e-12);
        }
    }

    #[test]
    fn deterministic_across_runs() {
        let values: Vec<f64> = (0..100).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let a = ewm_mean(&values, 12);
        let b = ewm_mean(&values, 12);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_input_empty_output() {
        assert!(ewm_mean(&[], 9).is_empty());
    }
}
