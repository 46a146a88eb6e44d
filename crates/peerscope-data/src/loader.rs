//! Dataset loader.
//!
//! Turns already-split, string-keyed rows into typed [`Record`]s. Splitting CSV
//! text into rows is handled by [`load_csv`]; [`load`] itself is a pure
//! transform.

use crate::error::{DataError, Result};
use crate::record::Record;
use crate::schema::{RawField, ScoreField, TextField};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::io::Read;
use tracing::{debug, warn};

/// A raw row keyed by column name.
pub trait RawRow {
    /// Cell value for `column`, if the column is present.
    fn field(&self, column: &str) -> Option<&str>;
}

impl<S: BuildHasher> RawRow for HashMap<String, String, S> {
    fn field(&self, column: &str) -> Option<&str> {
        self.get(column).map(String::as_str)
    }
}

impl RawRow for BTreeMap<String, String> {
    fn field(&self, column: &str) -> Option<&str> {
        self.get(column).map(String::as_str)
    }
}

impl<R: RawRow + ?Sized> RawRow for &R {
    fn field(&self, column: &str) -> Option<&str> {
        (**self).field(column)
    }
}

/// Parse a cell as a finite number.
///
/// Surrounding whitespace is ignored. Empty cells, unparsable text, `NaN` and
/// infinities all become `None`.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_text(row: &impl RawRow, field: TextField) -> Option<String> {
    row.field(field.column())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse one row; `None` when the row has no symbol.
fn parse_row(row: &impl RawRow) -> Option<Record> {
    let symbol = parse_text(row, TextField::Symbol)?;

    let mut record = Record::new(symbol);
    record.short_name = parse_text(row, TextField::ShortName);
    record.long_name = parse_text(row, TextField::LongName);
    record.sector = parse_text(row, TextField::Sector);
    record.industry = parse_text(row, TextField::Industry);
    record.exchange = parse_text(row, TextField::Exchange);

    for field in RawField::ALL {
        record.set_raw(field, row.field(field.column()).and_then(parse_number));
    }
    for field in ScoreField::ALL {
        record.set_score(field, row.field(field.column()).and_then(parse_number));
    }

    Some(record)
}

/// Sort by symbol and drop duplicates, keeping the first occurrence.
pub(crate) fn normalize(mut records: Vec<Record>) -> Vec<Record> {
    // Stable sort keeps input order among equal symbols.
    records.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    let before = records.len();
    records.dedup_by(|later, kept| later.symbol == kept.symbol);
    let duplicates = before - records.len();
    if duplicates > 0 {
        warn!(duplicates, "dropped rows with duplicate symbols");
    }
    records
}

/// Load raw rows into records sorted ascending by symbol.
///
/// Rows without a symbol are dropped. When a symbol repeats, the first row
/// wins.
pub fn load<I>(rows: I) -> Vec<Record>
where
    I: IntoIterator,
    I::Item: RawRow,
{
    let mut total = 0usize;
    let records: Vec<Record> = rows
        .into_iter()
        .inspect(|_| total += 1)
        .filter_map(|row| parse_row(&row))
        .collect();

    let missing_symbol = total - records.len();
    if missing_symbol > 0 {
        debug!(missing_symbol, "dropped rows without a symbol");
    }

    let records = normalize(records);
    debug!(rows = total, records = records.len(), "loaded dataset");
    records
}

/// Split CSV text into rows and [`load`] them.
///
/// The first line must be a header containing a `Symbol` column. Ragged rows
/// or broken quoting fail the whole load.
pub fn load_csv<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let symbol_column = TextField::Symbol.column();
    if !headers.iter().any(|h| h == symbol_column) {
        return Err(DataError::MissingColumn(symbol_column.to_string()));
    }

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let cells = result?;
        let row: HashMap<String, String> = headers
            .iter()
            .cloned()
            .zip(cells.iter().map(str::to_string))
            .collect();
        rows.push(row);
    }

    Ok(load(rows))
}
