#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/peerscope/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod filter;
pub mod ranking;
pub mod similarity;
pub mod vector;

pub use filter::{RecordFilter, SearchQuery, SearchScope};
pub use ranking::{MetricScore, RankedEntry, Ranking, RankingConfig, RankingEngine, rank};
pub use similarity::{Neighbor, SimilarityConfig, SimilarityEngine, nearest};

use thiserror::Error;

/// Errors raised when an engine is called with invalid arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No score fields were supplied
    #[error("At least one score field is required")]
    EmptyFields,

    /// Result limit of zero
    #[error("Invalid limit: {0} (must be at least 1)")]
    InvalidLimit(usize),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

pub(crate) const fn check_arguments(field_count: usize, limit: usize) -> Result<()> {
    if field_count == 0 {
        return Err(EngineError::EmptyFields);
    }
    if limit == 0 {
        return Err(EngineError::InvalidLimit(limit));
    }
    Ok(())
}
