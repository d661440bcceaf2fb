//! Caller-side signal ledger.
//!
//! The core keeps no signal history, so "is this a new signal?" is the
//! caller's job. The ledger is an explicit per-symbol map passed into each
//! diffing step — never ambient state — comparing the leading signal kind
//! of a fresh analysis against the previous observation.

use std::collections::HashMap;

use levelscan_core::{Signal, SignalKind};

/// Last observed leading signal kind per symbol.
#[derive(Debug, Default)]
pub struct SignalLedger {
    last_seen: HashMap<String, SignalKind>,
}

impl SignalLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the signals for `symbol` and report whether the leading kind
    /// changed since the previous observation. The first observation of a
    /// symbol counts as a change.
    pub fn observe(&mut self, symbol: &str, signals: &[Signal]) -> bool {
        let Some(leading) = signals.first().map(|s| s.kind) else {
            return false;
        };
        let previous = self.last_seen.insert(symbol.to_string(), leading);
        previous != Some(leading)
    }
}
