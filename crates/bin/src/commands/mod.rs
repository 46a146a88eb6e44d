//! Subcommand implementations.

pub(crate) mod metrics;
pub(crate) mod rank;
pub(crate) mod score;
pub(crate) mod show;

use crate::config::AppConfig;
use crate::error::CliError;
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use peerscope::{MetricSelection, Session, SessionConfig};
use peerscope_data::{DatasetSource, ScoreField, fetch_dataset};
use peerscope_engine::SimilarityConfig;
use peerscope_output::ExportFormat;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable tables
    Text,
    /// Pretty-printed JSON
    Json,
    /// CSV
    Csv,
}

impl OutputFormat {
    /// Export format for machine-readable output, `None` for text.
    pub(crate) const fn export(self) -> Option<ExportFormat> {
        match self {
            Self::Text => None,
            Self::Json => Some(ExportFormat::PrettyJson),
            Self::Csv => Some(ExportFormat::Csv),
        }
    }
}

/// Parse a comma-separated list of score fields.
///
/// Column names and labels are both accepted (`"EPS Score"`, `"eps"`). Blank
/// entries are skipped; an empty list means every field.
pub(crate) fn parse_metrics(list: &str) -> Result<Vec<ScoreField>, CliError> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| ScoreField::from_str(name).map_err(CliError::InvalidMetric))
        .collect()
}

/// Load the configured dataset behind a spinner and open a session on it.
pub(crate) async fn load_session(config: &AppConfig) -> Result<Session, CliError> {
    let source = DatasetSource::from_str(&config.data)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Loading {}", source));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let dataset = match fetch_dataset(&source).await {
        Ok(dataset) => {
            spinner.finish_and_clear();
            dataset
        }
        Err(e) => {
            spinner.finish_with_message("Failed!");
            return Err(e.into());
        }
    };

    let session_config = SessionConfig {
        metrics: MetricSelection::with_fields(config.metrics.iter().copied()),
        ranking_limit: config.top,
        similarity: SimilarityConfig {
            count: config.similar_count,
            ..SimilarityConfig::default()
        },
        ..SessionConfig::default()
    };
    Ok(Session::with_config(Arc::new(dataset), session_config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", vec![])]
    #[case("EPS Score", vec![ScoreField::Eps])]
    #[case("roe, p/e ratio ,", vec![ScoreField::Roe, ScoreField::PriceToEarnings])]
    #[case("Marketcap,Dividend Yield Score", vec![ScoreField::MarketCap, ScoreField::DividendYield])]
    fn test_parse_metrics(#[case] input: &str, #[case] expected: Vec<ScoreField>) {
        assert_eq!(parse_metrics(input).unwrap(), expected);
    }

    #[test]
    fn test_parse_metrics_rejects_unknown() {
        let err = parse_metrics("EPS, Beta").unwrap_err();
        assert_eq!(err.to_string(), "Unknown score field: Beta");
    }

    #[test]
    fn test_output_format_mapping() {
        assert_eq!(OutputFormat::Text.export(), None);
        assert_eq!(OutputFormat::Json.export(), Some(ExportFormat::PrettyJson));
        assert_eq!(OutputFormat::Csv.export(), Some(ExportFormat::Csv));
    }
}
