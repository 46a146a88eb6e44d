//! Percentile Scorer
//!
//! Converts one raw metric into a cross-sectional percentile score. The raw
//! values are loaded into a two column frame (`row`, metric) and ranked with a
//! lazy polars pipeline; the scores are then written back onto the records.

use crate::ScoreError;
use crate::registry::{ScoreMetricInfo, available_metrics};
use peerscope_data::Record;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const ROW_COLUMN: &str = "row";

/// A scorer turns a frame holding a raw metric into a frame holding its score.
pub trait MetricScorer {
    /// Name of the score column produced.
    fn name(&self) -> &str;

    /// Compute scores from a frame with a `row` column and the raw metric.
    ///
    /// The output keeps only rows with a raw value and has two columns:
    /// `row` and the score named [`MetricScorer::name`].
    fn compute_scores(&self, data: LazyFrame) -> Result<LazyFrame, ScoreError>;

    /// Columns the input frame must contain.
    fn required_columns(&self) -> Vec<&str>;
}

/// Configuration for percentile scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PercentileConfig {
    /// Upper end of the score scale (default: 100)
    pub scale: f64,
    /// Decimal places kept after rounding (default: 1)
    pub decimals: u32,
}

impl Default for PercentileConfig {
    fn default() -> Self {
        Self {
            scale: 100.0,
            decimals: 1,
        }
    }
}

impl PercentileConfig {
    /// Round to `decimals` places, ties to even.
    fn round(&self, value: f64) -> f64 {
        let factor = 10f64.powi(self.decimals as i32);
        (value * factor).round_ties_even() / factor
    }
}

/// Percentile-rank scorer for a single metric.
#[derive(Debug, Clone)]
pub struct PercentileScorer {
    metric: ScoreMetricInfo,
    config: PercentileConfig,
}

impl PercentileScorer {
    /// Create a scorer for `metric` with the default configuration.
    pub fn new(metric: ScoreMetricInfo) -> Self {
        Self::with_config(metric, PercentileConfig::default())
    }

    /// Create a scorer with an explicit configuration.
    pub const fn with_config(metric: ScoreMetricInfo, config: PercentileConfig) -> Self {
        Self { metric, config }
    }

    /// Metric being scored.
    pub const fn metric(&self) -> &ScoreMetricInfo {
        &self.metric
    }

    /// Scorer configuration.
    pub const fn config(&self) -> &PercentileConfig {
        &self.config
    }

    fn raw_column(&self) -> &'static str {
        self.metric.field.raw_field().column()
    }

    /// Build the input frame from raw `values`, applying the metric
    /// transform. Row numbers are positions in `values`.
    pub fn frame(&self, values: &[Option<f64>]) -> Result<DataFrame, ScoreError> {
        let rows: Vec<u32> = (0..values.len() as u32).collect();
        let values: Vec<Option<f64>> = values
            .iter()
            .map(|&value| match self.metric.transform {
                Some(transform) => transform.apply(value),
                None => value,
            })
            .collect();

        let df = DataFrame::new(vec![
            Column::new(ROW_COLUMN.into(), rows),
            Column::new(self.raw_column().into(), values),
        ])?;
        Ok(df)
    }

    /// Score a column of raw values, returning `(row, score)` pairs for rows
    /// with a usable value.
    pub fn score_values(&self, values: &[Option<f64>]) -> Result<Vec<(usize, f64)>, ScoreError> {
        let frame = self.frame(values)?;
        let df = self.compute_scores(frame.lazy())?.collect()?;

        let rows = df.column(ROW_COLUMN)?.u32()?;
        let scores = df.column(self.name())?.f64()?;

        let pairs: Vec<(usize, f64)> = rows
            .into_iter()
            .zip(scores)
            .filter_map(|(row, score)| Some((row? as usize, self.config.round(score?))))
            .collect();

        debug!(
            metric = self.name(),
            scored = pairs.len(),
            total = values.len(),
            "computed percentile scores"
        );
        Ok(pairs)
    }

    /// Score `records`, returning `(row, score)` pairs for rows with a value.
    pub fn score(&self, records: &[Record]) -> Result<Vec<(usize, f64)>, ScoreError> {
        let field = self.metric.field.raw_field();
        let values: Vec<Option<f64>> = records.iter().map(|r| r.raw(field)).collect();
        self.score_values(&values)
    }
}

impl MetricScorer for PercentileScorer {
    fn name(&self) -> &str {
        self.metric.field.column()
    }

    fn compute_scores(&self, data: LazyFrame) -> Result<LazyFrame, ScoreError> {
        let raw = self.raw_column();
        let schema = data.clone().collect_schema()?;
        for column in self.required_columns() {
            if !schema.contains(column) {
                return Err(ScoreError::MissingColumn(column.to_string()));
            }
        }

        // Rank over present values only so missing rows do not shift the
        // denominator.
        let percentile = col(raw)
            .rank(
                RankOptions {
                    method: RankMethod::Average,
                    descending: false,
                },
                None,
            )
            .cast(DataType::Float64)
            / col(raw).count().cast(DataType::Float64);

        let percentile = if self.metric.higher_is_better {
            percentile
        } else {
            lit(1.0) - percentile
        };

        let result = data
            .filter(col(raw).is_not_null())
            .with_columns([(percentile * lit(self.config.scale)).alias(self.name())])
            .select([col(ROW_COLUMN), col(self.name())]);

        Ok(result)
    }

    fn required_columns(&self) -> Vec<&str> {
        vec![ROW_COLUMN, self.raw_column()]
    }
}

/// Recompute every score column of `records` from their raw metrics.
///
/// Records without a usable raw value get a missing score. The input order is
/// preserved.
///
/// # Errors
///
/// Returns [`ScoreError::Polars`] if a ranking pipeline fails.
pub fn score_records(records: &[Record]) -> Result<Vec<Record>, ScoreError> {
    let mut scored = records.to_vec();

    for metric in available_metrics() {
        let scorer = PercentileScorer::new(metric);
        for record in &mut scored {
            record.set_score(metric.field, None);
        }
        for (row, score) in scorer.score(records)? {
            scored[row].set_score(metric.field, Some(score));
        }
    }

    info!(
        records = scored.len(),
        metrics = available_metrics().len(),
        "scored dataset"
    );
    Ok(scored)
}
