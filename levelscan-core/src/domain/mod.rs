//! Domain types for LevelScan

pub mod bar;
pub mod level;
pub mod signal;

pub use bar::{PriceBar, PriceSeries};
pub use level::{LevelKind, SrLevel};
pub use signal::{Signal, SignalKind};

/// Symbol type alias
pub type Symbol = String;
