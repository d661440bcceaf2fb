//! Rolling-window aggregations.

/// Rolling mean with a minimum of one observation: `out[i]` averages the
/// last `min(i + 1, window)` values, so the window degrades gracefully at
/// the start of the series instead of emitting a gap.
pub fn rolling_mean_min1(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window >= 1, "rolling window must be >= 1");

    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for i in 0..values.len() {
        sum += values[i];
        if i >= window {
            sum -= values[i - window];
        }
        let count = (i + 1).min(window);
        out.push(sum / count as f64);
    }
    out
}
