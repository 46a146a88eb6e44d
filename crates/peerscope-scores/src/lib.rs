#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/peerscope/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod percentile;
pub mod registry;
pub mod table;

pub use percentile::{MetricScorer, PercentileConfig, PercentileScorer, score_records};
pub use registry::{
    ScoreMetricInfo, Transform, available_metrics, get_metric_info, metrics_by_direction,
};
pub use table::ScoreTable;

use thiserror::Error;

/// Errors raised by the scoring pipeline.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Input frame lacks a column the scorer needs
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// CSV read or write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
