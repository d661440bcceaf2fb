//! Indicator engine benchmarks: RSI and MACD over a long synthetic series.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use levelscan_core::{compute_macd, compute_rsi};

fn synthetic_closes(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + (i as f64 * 0.05).sin() * 12.0 + (i as f64 * 0.011).cos() * 4.0)
        .collect()
}

fn bench_indicators(c: &mut Criterion) {
    let closes = synthetic_closes(10_000);

    c.bench_function("rsi_10k", |b| {
        b.iter(|| compute_rsi(black_box(&closes), black_box(14)))
    });

    c.bench_function("macd_10k", |b| {
        b.iter(|| compute_macd(black_box(&closes), black_box(12), black_box(26), black_box(9)))
    });
}

criterion_group!(benches, bench_indicators);
criterion_main!(benches);
