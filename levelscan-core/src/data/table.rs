//! Loosely-typed tabular input — the shape raw market-data feeds arrive in.
//!
//! A `RawTable` is what the CSV reader, the quote fetcher, or a caller with
//! an in-memory frame hands to the normalizer: ordered named columns of
//! untyped cells, one row per observation, plus an optional pre-parsed time
//! index. Nothing here is validated; that is the normalizer's job.

use chrono::{DateTime, Utc};

/// One cell of a raw feed.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Float(f64),
    Text(String),
    Missing,
}

impl Cell {
    /// Numeric coercion: finite floats pass through, text is parsed as f64,
    /// everything else (including NaN/inf and parse failures) is missing.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Cell::Float(v) if v.is_finite() => Some(*v),
            Cell::Float(_) => None,
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            Cell::Missing => None,
        }
    }
}

/// A named column of cells. Multi-level headers keep one entry per level;
/// the normalizer flattens them with an underscore before matching.
#[derive(Debug, Clone, PartialEq)]
pub struct RawColumn {
    name_parts: Vec<String>,
    pub values: Vec<Cell>,
}

impl RawColumn {
    /// Column with a single-level header.
    pub fn new(name: impl Into<String>, values: Vec<Cell>) -> Self {
        Self {
            name_parts: vec![name.into()],
            values,
        }
    }

    /// Column with a multi-level header, e.g. `["Close", "AAPL"]`.
    pub fn multi_level(name_parts: Vec<String>, values: Vec<Cell>) -> Self {
        Self { name_parts, values }
    }

    /// Header levels joined with `_`, trimmed — the name used for matching.
    pub fn flat_name(&self) -> String {
        self.name_parts.join("_").trim().to_string()
    }

    /// Cell at `row`; rows past the column's end read as missing.
    pub fn cell(&self, row: usize) -> &Cell {
        self.values.get(row).unwrap_or(&Cell::Missing)
    }
}

/// Arbitrary tabular input: columns plus an optional time index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub columns: Vec<RawColumn>,
    /// Pre-parsed time index, when the feed already carries one.
    pub index: Option<Vec<DateTime<Utc>>>,
}

impl RawTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_index(index: Vec<DateTime<Utc>>) -> Self {
        Self {
            columns: Vec::new(),
            index: Some(index),
        }
    }

    pub fn push_column(&mut self, column: RawColumn) {
        self.columns.push(column);
    }

    /// Number of rows: the longest column, or the index length for a table
    /// with no columns yet.
    pub fn height(&self) -> usize {
        let cols = self.columns.iter().map(|c| c.values.len()).max().unwrap_or(0);
        match &self.index {
            Some(idx) => cols.max(idx.len()),
            None => cols,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0
    }
}
