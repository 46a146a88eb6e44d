//! CLI errors.

use peerscope::DashboardError;
use peerscope_data::DataError;
use peerscope_output::ExportError;
use peerscope_scores::ScoreError;
use thiserror::Error;

/// Anything that can end a CLI run.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Dashboard(#[from] DashboardError),

    #[error("Unable to load dataset: {0}")]
    Data(#[from] DataError),

    #[error("Scoring failed: {0}")]
    Score(#[from] ScoreError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Invalid configuration {path}: {reason}")]
    Config { path: String, reason: String },

    #[error("{0}")]
    InvalidMetric(String),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
