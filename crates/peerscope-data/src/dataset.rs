//! Immutable, symbol-indexed record set.

use crate::loader::{self, RawRow};
use crate::record::Record;
use std::collections::HashMap;

/// The loaded dataset.
///
/// Records are sorted by symbol and unique. Once built, the dataset only hands
/// out shared references.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    symbol_to_index: HashMap<String, usize>,
}

impl Dataset {
    /// Build a dataset from records, sorting them and dropping duplicate
    /// symbols (first occurrence wins).
    pub fn new(records: Vec<Record>) -> Self {
        let records = loader::normalize(records);
        let symbol_to_index = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.symbol.clone(), i))
            .collect();

        Self {
            records,
            symbol_to_index,
        }
    }

    /// Load raw rows into a dataset.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator,
        I::Item: RawRow,
    {
        Self::new(loader::load(rows))
    }

    /// All records, sorted ascending by symbol.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Look up a record by exact symbol.
    pub fn get(&self, symbol: &str) -> Option<&Record> {
        self.symbol_to_index
            .get(symbol)
            .map(|&i| &self.records[i])
    }

    /// Check if a symbol is in the dataset.
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbol_to_index.contains_key(symbol)
    }

    /// First record in symbol order.
    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    /// All symbols in order.
    pub fn symbols(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.symbol.as_str()).collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}
