//! CLI configuration.
//!
//! Read from `--config`, or from `<config dir>/peerscope/config.json` when that
//! file exists. Command-line flags override file values.

use crate::error::CliError;
use peerscope_data::ScoreField;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Dataset used when neither the config file nor `--data` names one.
pub(crate) const DEFAULT_DATA_SOURCE: &str = "data/Sp500fin2_scored.csv";

/// Settings shared by all subcommands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    /// Dataset path or URL
    pub(crate) data: String,
    /// Active score fields (empty: all)
    pub(crate) metrics: Vec<ScoreField>,
    /// Number of similar companies shown (default: 5)
    pub(crate) similar_count: usize,
    /// Default ranking size (default: 100)
    pub(crate) top: usize,
    /// Log level when RUST_LOG is unset (default: warn)
    pub(crate) log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DEFAULT_DATA_SOURCE.to_string(),
            metrics: Vec::new(),
            similar_count: 5,
            top: peerscope::DEFAULT_TOP_N,
            log_level: "warn".to_string(),
        }
    }
}

/// `<config dir>/peerscope/config.json`, if the platform has a config dir.
pub(crate) fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("peerscope").join("config.json"))
}

impl AppConfig {
    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// An explicit path must exist. A missing default file yields the
    /// defaults.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, CliError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path),
                None => Ok(Self::default()),
            },
        }
    }

    fn from_file(path: &Path) -> Result<Self, CliError> {
        let config_error = |reason: String| CliError::Config {
            path: path.display().to_string(),
            reason,
        };
        let text = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let config = Self::parse(&text).map_err(|e| config_error(e.to_string()))?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
