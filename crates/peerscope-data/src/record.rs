//! Company record.

use crate::schema::{RawField, SCORE_FALLBACK, ScoreField, TextField};

/// One company with its raw metrics and pre-computed scores.
///
/// Numeric values are `Some` only when finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Ticker symbol, unique within a dataset.
    pub symbol: String,
    /// Short company name.
    pub short_name: Option<String>,
    /// Long company name.
    pub long_name: Option<String>,
    /// Sector name.
    pub sector: Option<String>,
    /// Industry name.
    pub industry: Option<String>,
    /// Listing exchange.
    pub exchange: Option<String>,
    raw: [Option<f64>; RawField::COUNT],
    scores: [Option<f64>; ScoreField::COUNT],
}

impl Record {
    /// Create a record with no descriptive text and no numeric values.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            short_name: None,
            long_name: None,
            sector: None,
            industry: None,
            exchange: None,
            raw: [None; RawField::COUNT],
            scores: [None; ScoreField::COUNT],
        }
    }

    /// Set the short name.
    pub fn with_short_name(mut self, name: impl Into<String>) -> Self {
        self.short_name = Some(name.into());
        self
    }

    /// Set the long name.
    pub fn with_long_name(mut self, name: impl Into<String>) -> Self {
        self.long_name = Some(name.into());
        self
    }

    /// Set sector and industry.
    pub fn with_classification(
        mut self,
        sector: impl Into<String>,
        industry: impl Into<String>,
    ) -> Self {
        self.sector = Some(sector.into());
        self.industry = Some(industry.into());
        self
    }

    /// Set a raw metric. Non-finite values are stored as missing.
    pub fn with_raw(mut self, field: RawField, value: Option<f64>) -> Self {
        self.set_raw(field, value);
        self
    }

    /// Set a score. Non-finite values are stored as missing.
    pub fn with_score(mut self, field: ScoreField, value: Option<f64>) -> Self {
        self.set_score(field, value);
        self
    }

    /// Overwrite a raw metric in place. Non-finite values are stored as missing.
    pub fn set_raw(&mut self, field: RawField, value: Option<f64>) {
        self.raw[field.index()] = value.filter(|v| v.is_finite());
    }

    /// Overwrite a score in place. Non-finite values are stored as missing.
    pub fn set_score(&mut self, field: ScoreField, value: Option<f64>) {
        self.scores[field.index()] = value.filter(|v| v.is_finite());
    }

    /// Raw metric value.
    pub const fn raw(&self, field: RawField) -> Option<f64> {
        self.raw[field.index()]
    }

    /// Score value.
    pub const fn score(&self, field: ScoreField) -> Option<f64> {
        self.scores[field.index()]
    }

    /// Score value, or `fallback` when missing.
    pub fn score_or(&self, field: ScoreField, fallback: f64) -> f64 {
        self.score(field).unwrap_or(fallback)
    }

    /// Score value, or [`SCORE_FALLBACK`] when missing.
    pub fn score_or_fallback(&self, field: ScoreField) -> f64 {
        self.score_or(field, SCORE_FALLBACK)
    }

    /// Descriptive column value.
    pub fn text(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::Symbol => Some(self.symbol.as_str()),
            TextField::ShortName => self.short_name.as_deref(),
            TextField::LongName => self.long_name.as_deref(),
            TextField::Sector => self.sector.as_deref(),
            TextField::Industry => self.industry.as_deref(),
            TextField::Exchange => self.exchange.as_deref(),
        }
    }

    /// Short name, falling back to the long name.
    pub fn display_name(&self) -> Option<&str> {
        self.short_name.as_deref().or(self.long_name.as_deref())
    }

    /// `"Sector · Industry"`, skipping missing parts.
    pub fn classification(&self) -> Option<String> {
        let parts: Vec<&str> = [self.sector.as_deref(), self.industry.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" · "))
        }
    }
}
