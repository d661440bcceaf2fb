//! Series normalizer — resolves messy feed columns onto the canonical OHLCV
//! schema and produces a time-ordered [`PriceSeries`].
//!
//! Column resolution is an explicit ordered rule list: each input column's
//! flattened, lowercased header is substring-matched against the canonical
//! names in order; the first rule that matches claims the column, the first
//! claimed column wins per canonical field, and everything unmatched is
//! dropped. Rows with any unparseable canonical value are dropped whole —
//! no interpolation.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

use super::table::{Cell, RawTable};
use crate::domain::{PriceBar, PriceSeries};

/// Canonical field names, in resolution order.
const CANONICAL: [&str; 5] = ["open", "high", "low", "close", "volume"];

const OPEN: usize = 0;
const HIGH: usize = 1;
const LOW: usize = 2;
const CLOSE: usize = 3;
const VOLUME: usize = 4;

/// Failure to map a raw table onto the canonical schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// No input column resolved to this canonical field.
    #[error("required column not resolvable: {0}")]
    MissingField(&'static str),

    /// No usable time index and no promotable date column.
    #[error("cannot build a time index: {0}")]
    BadIndex(String),

    /// Nothing left once incomplete rows were dropped.
    #[error("series is empty after dropping incomplete rows")]
    EmptySeries,
}

/// Where row timestamps come from.
#[derive(Clone, Copy)]
enum TimeSource<'a> {
    /// The feed already carried a time-ordered index; used as-is.
    Index(&'a [DateTime<Utc>]),
    /// A date-named column promoted to the index.
    Column(usize),
}

/// Validate and standardize a raw table into a canonical price series.
///
/// The output is stable-sorted ascending by timestamp with the first of any
/// duplicate timestamp kept, so the [`PriceSeries`] ordering invariant holds
/// even for feeds that arrive shuffled.
pub fn normalize(table: &RawTable) -> Result<PriceSeries, SchemaError> {
    let resolved = resolve_columns(table)?;
    let time_source = resolve_time_source(table, &resolved)?;
    let height = table.height();

    let mut bars = Vec::with_capacity(height);
    for row in 0..height {
        let fields = [
            table.columns[resolved[OPEN]].cell(row).to_f64(),
            table.columns[resolved[HIGH]].cell(row).to_f64(),
            table.columns[resolved[LOW]].cell(row).to_f64(),
            table.columns[resolved[CLOSE]].cell(row).to_f64(),
            table.columns[resolved[VOLUME]].cell(row).to_f64(),
        ];
        // Any missing canonical field drops the whole row.
        let [Some(open), Some(high), Some(low), Some(close), Some(volume)] = fields else {
            continue;
        };

        // Timestamps are only required for rows that survive the drop.
        let timestamp = match time_source {
            TimeSource::Index(index) => index[row],
            TimeSource::Column(col) => {
                let cell = table.columns[col].cell(row);
                parse_timestamp(cell).ok_or_else(|| {
                    SchemaError::BadIndex(format!("row {row}: unparseable timestamp {cell:?}"))
                })?
            }
        };

        bars.push(PriceBar {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    if bars.is_empty() {
        return Err(SchemaError::EmptySeries);
    }
    Ok(PriceSeries::from_bars(bars))
}

/// Resolve each canonical field to the index of the column that claims it.
fn resolve_columns(table: &RawTable) -> Result<[usize; 5], SchemaError> {
    let mut resolved: [Option<usize>; 5] = [None; 5];
    for (ci, col) in table.columns.iter().enumerate() {
        let name = col.flat_name().to_lowercase();
        if let Some(fi) = CANONICAL.iter().position(|pat| name.contains(pat)) {
            if resolved[fi].is_none() {
                resolved[fi] = Some(ci);
            }
        }
    }
    let mut out = [0usize; 5];
    for (fi, slot) in resolved.iter().enumerate() {
        out[fi] = slot.ok_or(SchemaError::MissingField(CANONICAL[fi]))?;
    }
    Ok(out)
}

/// Pick the timestamp source: an existing index wins, otherwise the first
/// unclaimed column whose name looks date-like is promoted.
fn resolve_time_source<'a>(
    table: &'a RawTable,
    claimed: &[usize; 5],
) -> Result<TimeSource<'a>, SchemaError> {
    if let Some(index) = &table.index {
        if index.len() < table.height() {
            return Err(SchemaError::BadIndex(format!(
                "index has {} entries for {} rows",
                index.len(),
                table.height()
            )));
        }
        return Ok(TimeSource::Index(index));
    }

    let date_col = table.columns.iter().enumerate().position(|(ci, col)| {
        if claimed.contains(&ci) {
            return false;
        }
        let name = col.flat_name().to_lowercase();
        name.contains("date") || name.contains("time")
    });
    match date_col {
        Some(ci) => Ok(TimeSource::Column(ci)),
        None => Err(SchemaError::BadIndex(
            "no time index and no date column to promote".into(),
        )),
    }
}

/// Parse one cell as a UTC timestamp.
///
/// Accepts epoch seconds, RFC 3339, `YYYY-MM-DD HH:MM:SS` (with or without
/// the `T` separator), and bare `YYYY-MM-DD` dates at midnight UTC.
fn parse_timestamp(cell: &Cell) -> Option<DateTime<Utc>> {
    match cell {
        Cell::Float(v) if v.is_finite() => DateTime::from_timestamp(*v as i64, 0),
        Cell::Float(_) => None,
        Cell::Text(s) => parse_timestamp_str(s.trim()),
        Cell::Missing => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(ndt.and_utc());
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(ndt.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|ndt| ndt.and_utc());
    }
    None
}
