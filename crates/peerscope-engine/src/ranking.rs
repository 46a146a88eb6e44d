//! Blended ranking engine.
//!
//! Scores every record as the sum of its selected score fields (missing scores
//! count as the fallback) and orders the result by total, highest first.

use crate::filter::RecordFilter;
use crate::{Result, check_arguments};
use peerscope_data::{Record, SCORE_FALLBACK, ScoreField};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One field's contribution to a blended score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricScore {
    /// Score field.
    pub field: ScoreField,
    /// Score used for ranking.
    pub score: f64,
    /// Whether `score` is the fallback because the record had no value.
    pub is_fallback: bool,
}

/// A ranked record with its blended scores.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry<'a> {
    /// The ranked record.
    pub record: &'a Record,
    /// Per-field scores, in the order the fields were requested.
    pub metric_scores: Vec<MetricScore>,
    /// Sum of the per-field scores.
    pub total_score: f64,
    /// Total divided by the number of fields.
    pub average_score: f64,
}

impl RankedEntry<'_> {
    /// The score used for `field`, if it was part of the ranking.
    pub fn score(&self, field: ScoreField) -> Option<f64> {
        self.metric_scores
            .iter()
            .find(|m| m.field == field)
            .map(|m| m.score)
    }
}

/// Result of a ranking run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ranking<'a> {
    /// Top entries, best first.
    pub entries: Vec<RankedEntry<'a>>,
    /// Number of records that passed the filter, before truncation.
    pub matched: usize,
}

impl<'a> Ranking<'a> {
    /// Number of returned entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries were returned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries, best first.
    pub fn iter(&self) -> std::slice::Iter<'_, RankedEntry<'a>> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for Ranking<'a> {
    type Item = RankedEntry<'a>;
    type IntoIter = std::vec::IntoIter<RankedEntry<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Configuration for the ranking engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Maximum number of entries returned (default: 100)
    pub limit: usize,
    /// Score used for missing values (default: 50)
    pub fallback: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            limit: 100,
            fallback: SCORE_FALLBACK,
        }
    }
}

/// Blended ranking over score fields.
#[derive(Debug, Clone, Default)]
pub struct RankingEngine {
    config: RankingConfig,
}

impl RankingEngine {
    /// Create a new ranking engine.
    pub const fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    /// Engine configuration.
    pub const fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Rank `pool` with the configured limit and fallback.
    ///
    /// # Errors
    ///
    /// See [`rank`].
    pub fn rank<'a>(
        &self,
        pool: &'a [Record],
        fields: &[ScoreField],
        filter: Option<&dyn RecordFilter>,
    ) -> Result<Ranking<'a>> {
        rank_with_fallback(pool, fields, filter, self.config.limit, self.config.fallback)
    }
}

/// Blend, sort and truncate.
///
/// 1. Keep records accepted by `filter` (all records when `None`).
/// 2. Score each record over `fields`, using the fallback for missing values.
/// 3. Sort by total descending, ties by ascending symbol.
/// 4. Keep the first `limit` entries.
///
/// # Errors
///
/// [`EngineError::EmptyFields`](crate::EngineError::EmptyFields) when `fields`
/// is empty and [`EngineError::InvalidLimit`](crate::EngineError::InvalidLimit)
/// when `limit` is zero.
pub fn rank<'a>(
    pool: &'a [Record],
    fields: &[ScoreField],
    filter: Option<&dyn RecordFilter>,
    limit: usize,
) -> Result<Ranking<'a>> {
    rank_with_fallback(pool, fields, filter, limit, SCORE_FALLBACK)
}

fn blend<'a>(record: &'a Record, fields: &[ScoreField], fallback: f64) -> RankedEntry<'a> {
    let metric_scores: Vec<MetricScore> = fields
        .iter()
        .map(|&field| {
            let value = record.score(field);
            MetricScore {
                field,
                score: value.unwrap_or(fallback),
                is_fallback: value.is_none(),
            }
        })
        .collect();

    let total_score: f64 = metric_scores.iter().map(|m| m.score).sum();
    let average_score = total_score / metric_scores.len() as f64;

    RankedEntry {
        record,
        metric_scores,
        total_score,
        average_score,
    }
}

fn rank_with_fallback<'a>(
    pool: &'a [Record],
    fields: &[ScoreField],
    filter: Option<&dyn RecordFilter>,
    limit: usize,
    fallback: f64,
) -> Result<Ranking<'a>> {
    check_arguments(fields.len(), limit)?;

    let mut entries: Vec<RankedEntry<'a>> = pool
        .iter()
        .filter(|record| filter.is_none_or(|f| f.matches(record)))
        .map(|record| blend(record, fields, fallback))
        .collect();
    let matched = entries.len();

    entries.sort_by(|a, b| {
        b.total_score
            .total_cmp(&a.total_score)
            .then_with(|| a.record.symbol.cmp(&b.record.symbol))
    });
    entries.truncate(limit);

    debug!(
        pool = pool.len(),
        matched,
        returned = entries.len(),
        fields = fields.len(),
        "computed blended ranking"
    );

    Ok(Ranking { entries, matched })
}
