//! CSV ingestion — reads a delimited file into a [`RawTable`].
//!
//! Headers are taken from the first record and kept verbatim; the
//! normalizer owns all name matching and coercion. Cells that parse as
//! numbers become floats, empty cells become missing, everything else stays
//! text (a date column survives as text for index promotion).

use std::path::Path;

use super::table::{Cell, RawColumn, RawTable};

/// Read a CSV file into a raw table, one column per header.
pub fn read_csv_table(path: &Path) -> Result<RawTable, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut columns: Vec<Vec<Cell>> = vec![Vec::new(); headers.len()];

    for record in reader.records() {
        let record = record?;
        for (ci, column) in columns.iter_mut().enumerate() {
            column.push(match record.get(ci) {
                None => Cell::Missing,
                Some(raw) => parse_cell(raw),
            });
        }
    }

    let mut table = RawTable::new();
    for (name, values) in headers.into_iter().zip(columns) {
        table.push_column(RawColumn::new(name, values));
    }
    Ok(table)
}

fn parse_cell(raw: &str) -> Cell {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Cell::Missing;
    }
    match trimmed.parse::<f64>() {
        Ok(v) => Cell::Float(v),
        Err(_) => Cell::Text(trimmed.to_string()),
    }
}
