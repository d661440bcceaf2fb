//! Rule-based signal generation for the most recent bar.
//!
//! Evaluates the last bar of an indicator frame against the five most
//! recent support/resistance levels. Every qualifying level appends its own
//! signal, so one bar can carry several BUY and SELL entries at once when
//! multiple levels qualify — intentional behavior, not deduplicated. When
//! nothing qualifies, exactly one HOLD is emitted with the last bar's
//! readings for diagnostics.

use crate::domain::{LevelKind, Signal, SignalKind, SrLevel};
use crate::indicators::{rolling_mean_min1, IndicatorFrame};

/// How many of the most recent levels are considered.
const RECENT_LEVELS: usize = 5;

/// Proximity bands: close within 1% above support / 1% below resistance.
const SUPPORT_BAND: f64 = 1.01;
const RESISTANCE_BAND: f64 = 0.99;

const RSI_OVERSOLD: f64 = 30.0;
const RSI_OVERBOUGHT: f64 = 70.0;

/// Rolling window for the average-volume confirmation.
const VOLUME_WINDOW: usize = 20;

/// Generate signals for the most recent bar of `frame`.
///
/// `levels` must be ordered ascending by timestamp (as produced by level
/// extraction); the five most recent are evaluated oldest-first. With
/// `use_volume` set, BUY/SELL additionally require the current volume to
/// exceed the 20-bar rolling average (both strictly positive). Undefined
/// RSI/MACD readings at the last bar never produce BUY/SELL — the call
/// falls through to HOLD. An empty frame yields no signals.
pub fn generate_signals(frame: &IndicatorFrame, levels: &[SrLevel], use_volume: bool) -> Vec<Signal> {
    let Some((last_bar, rsi_raw, macd_raw, macd_signal_raw)) = frame.last_row() else {
        return Vec::new();
    };

    let rsi = finite(rsi_raw);
    let macd = finite(macd_raw);
    let macd_signal = finite(macd_signal_raw);
    let close = last_bar.close;
    let volume = finite(last_bar.volume);

    let volumes = frame.series().volumes();
    let avg_volume = rolling_mean_min1(&volumes, VOLUME_WINDOW)
        .last()
        .copied()
        .filter(|v| v.is_finite());

    // Volume confirmation mirrors the positivity requirement on both sides:
    // a zero current or zero average volume never confirms.
    let volume_ok = !use_volume
        || matches!((volume, avg_volume), (Some(v), Some(avg)) if v > 0.0 && avg > 0.0 && v > avg);

    let mut signals = Vec::new();
    let recent = &levels[levels.len().saturating_sub(RECENT_LEVELS)..];
    for level in recent {
        let (Some(rsi), Some(macd), Some(macd_signal)) = (rsi, macd, macd_signal) else {
            break;
        };
        match level.kind {
            LevelKind::Support if close <= level.price * SUPPORT_BAND => {
                if rsi < RSI_OVERSOLD && macd > macd_signal && volume_ok {
                    signals.push(Signal {
                        kind: SignalKind::Buy,
                        price: close,
                        timestamp: last_bar.timestamp,
                        reason: reason("RSI oversold + near support + MACD bullish", use_volume),
                        rsi: Some(rsi),
                        macd: Some(macd),
                        volume,
                    });
                }
            }
            LevelKind::Resistance if close >= level.price * RESISTANCE_BAND => {
                if rsi > RSI_OVERBOUGHT && macd < macd_signal && volume_ok {
                    signals.push(Signal {
                        kind: SignalKind::Sell,
                        price: close,
                        timestamp: last_bar.timestamp,
                        reason: reason("RSI overbought + near resistance + MACD bearish", use_volume),
                        rsi: Some(rsi),
                        macd: Some(macd),
                        volume,
                    });
                }
            }
            _ => {}
        }
    }

    if signals.is_empty() {
        signals.push(Signal {
            kind: SignalKind::Hold,
            price: close,
            timestamp: last_bar.timestamp,
            reason: "No strong signal".into(),
            rsi,
            macd,
            volume,
        });
    }
    signals
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

fn reason(base: &str, use_volume: bool) -> String {
    if use_volume {
        format!("{base} + Volume confirmation")
    } else {
        base.to_string()
    }
}
