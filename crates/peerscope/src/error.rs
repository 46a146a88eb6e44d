//! Session errors.

use peerscope_data::{DataError, ScoreField};
use peerscope_engine::EngineError;
use thiserror::Error;

/// Errors surfaced to the presentation layer.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The dataset could not be fetched or parsed
    #[error("Unable to load dataset: {0}")]
    LoadFailure(#[from] DataError),

    /// The requested symbol is not in the dataset
    #[error("Unknown symbol: {0}")]
    InvalidSelection(String),

    /// Deactivating the metric would leave no active metrics
    #[error("Cannot deactivate {0}: at least one metric must stay active")]
    RejectedToggle(ScoreField),

    /// A query produced no results
    #[error("{0}")]
    EmptyResultSet(String),

    /// An engine rejected its arguments
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl DashboardError {
    /// Whether the session can continue after this error.
    ///
    /// Only a failed load is fatal.
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::LoadFailure(_))
    }
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, DashboardError>;
