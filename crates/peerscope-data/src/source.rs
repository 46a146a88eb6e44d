//! Dataset source resolution and fetching.
//!
//! The dataset is read exactly once at startup, either from a local file or
//! over HTTP(S). There is no retry and no timeout beyond the HTTP client's.

use crate::dataset::Dataset;
use crate::error::{DataError, Result};
use crate::loader::load_csv;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

/// User agent sent when downloading the dataset.
const USER_AGENT: &str = concat!("peerscope/", env!("CARGO_PKG_VERSION"));

/// Where the dataset lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// Local CSV file
    Path(PathBuf),
    /// Remote CSV resource
    Url(String),
}

impl DatasetSource {
    /// Classify a location: `http://` and `https://` are URLs, anything else
    /// is a filesystem path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::Path(PathBuf::from(trimmed))
        }
    }
}

impl FromStr for DatasetSource {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(DataError::Parse("Empty dataset location".to_string()));
        }
        Ok(Self::parse(s))
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{}", url),
        }
    }
}

async fn download(url: &str) -> Result<Vec<u8>> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(DataError::Network)?;

    let response = client.get(url).send().await.map_err(DataError::Network)?;

    if !response.status().is_success() {
        return Err(DataError::Http(format!(
            "Failed to fetch dataset: HTTP {}",
            response.status()
        )));
    }

    let body = response.bytes().await.map_err(DataError::Network)?;
    Ok(body.to_vec())
}

/// Read and load the dataset.
///
/// # Errors
///
/// Any transport or CSV failure. These are fatal to startup.
pub async fn fetch_dataset(source: &DatasetSource) -> Result<Dataset> {
    debug!(%source, "fetching dataset");

    let bytes = match source {
        DatasetSource::Path(path) => tokio::fs::read(path).await?,
        DatasetSource::Url(url) => download(url).await?,
    };

    let dataset = Dataset::new(load_csv(bytes.as_slice())?);
    info!(%source, records = dataset.len(), "dataset loaded");
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://example.com/data.csv", true)]
    #[case("HTTP://example.com/data.csv", true)]
    #[case("./data/Sp500fin2_scored.csv", false)]
    #[case("/tmp/http_dump.csv", false)]
    fn test_parse_source(#[case] input: &str, #[case] is_url: bool) {
        let source = DatasetSource::parse(input);
        assert_eq!(matches!(source, DatasetSource::Url(_)), is_url);
    }

    #[test]
    fn test_empty_location_rejected() {
        assert!("  ".parse::<DatasetSource>().is_err());
    }

    #[test]
    fn test_display() {
        let source = DatasetSource::parse("data/file.csv");
        assert_eq!(source.to_string(), "data/file.csv");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = DatasetSource::Path(PathBuf::from("/nonexistent/peerscope/data.csv"));
        let err = fetch_dataset(&source).await.unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }
}
