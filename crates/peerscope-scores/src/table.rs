//! Whole-file scoring.
//!
//! A [`ScoreTable`] holds a fundamentals CSV exactly as read: every column,
//! every row and the original row order. Scoring only adds or overwrites the
//! `<metric> Score` columns, so files carrying extra columns survive a
//! round trip.

use crate::ScoreError;
use crate::percentile::PercentileScorer;
use crate::registry::available_metrics;
use peerscope_data::{ScoreField, parse_number};
use std::io::{Read, Write};
use tracing::{debug, info};

/// A CSV table with positional rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ScoreTable {
    /// Read a CSV with a header row. Short rows are padded with empty cells.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::Csv`] on malformed input.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ScoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(headers.len().max(row.len()), String::new());
            rows.push(row);
        }

        debug!(columns = headers.len(), rows = rows.len(), "read score table");
        Ok(Self { headers, rows })
    }

    /// Column names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column named `name`, ignoring surrounding whitespace.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    /// Cell at `row` in column `name`.
    pub fn get(&self, row: usize, name: &str) -> Option<&str> {
        let column = self.column_index(name)?;
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Numeric values of column `name`; `None` when the column is absent.
    fn numeric_column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let column = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(column).and_then(|cell| parse_number(cell)))
                .collect(),
        )
    }

    /// Index of column `name`, appending an empty column when it is absent.
    fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(index) = self.column_index(name) {
            return index;
        }
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            row.resize(self.headers.len(), String::new());
        }
        self.headers.len() - 1
    }

    /// Compute every score whose raw column is present.
    ///
    /// Existing score columns are overwritten in place, new ones are
    /// appended. Rows without a usable raw value get an empty score cell.
    /// Returns the fields that were scored.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::Polars`] if a ranking pipeline fails.
    pub fn score(&mut self) -> Result<Vec<ScoreField>, ScoreError> {
        let mut scored = Vec::new();

        for metric in available_metrics() {
            let Some(values) = self.numeric_column(metric.field.label()) else {
                debug!(metric = metric.field.label(), "raw column absent, skipped");
                continue;
            };

            let scorer = PercentileScorer::new(metric);
            let decimals = scorer.config().decimals as usize;
            let pairs = scorer.score_values(&values)?;

            let column = self.ensure_column(metric.field.column());
            for row in &mut self.rows {
                row[column].clear();
            }
            for (row, score) in pairs {
                self.rows[row][column] = format!("{score:.decimals$}");
            }
            scored.push(metric.field);
        }

        info!(rows = self.rows.len(), metrics = scored.len(), "scored table");
        Ok(scored)
    }

    /// Write the table as CSV.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::Csv`] or [`ScoreError::Io`] on write failure.
    pub fn write<W: Write>(&self, writer: W) -> Result<(), ScoreError> {
        let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(writer);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
