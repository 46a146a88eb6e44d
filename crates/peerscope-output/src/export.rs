//! Export functionality for rankings, neighbour lists and datasets.
//!
//! Snapshots are stamped with the time they were generated and can be written
//! as CSV or JSON.

use chrono::{DateTime, Utc};
use peerscope_data::{RawField, Record, ScoreField, TextField};
use peerscope_engine::{MetricScore, Neighbor, Ranking};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| ExportError::InvalidFormat(e.to_string()))
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// One row of an exported ranking.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankingRow {
    /// 1-based position.
    pub rank: usize,
    /// Ticker symbol.
    pub symbol: String,
    /// Short name, or long name when absent.
    pub name: Option<String>,
    /// Sector name.
    pub sector: Option<String>,
    /// Industry name.
    pub industry: Option<String>,
    /// Sum of the selected scores.
    pub total_score: f64,
    /// Mean of the selected scores.
    pub average_score: f64,
    /// Per-field breakdown.
    pub scores: Vec<MetricScore>,
}

/// Snapshot of a blended ranking.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankingExport {
    /// When the snapshot was taken.
    pub generated_at: DateTime<Utc>,
    /// Score fields that were blended.
    pub metrics: Vec<ScoreField>,
    /// Number of companies that passed the filter.
    pub matched: usize,
    /// Ranked rows, best first.
    pub rows: Vec<RankingRow>,
}

impl RankingExport {
    /// Snapshot `ranking` now.
    pub fn new(ranking: &Ranking<'_>, metrics: &[ScoreField]) -> Self {
        Self::at(ranking, metrics, Utc::now())
    }

    /// Snapshot `ranking` with an explicit timestamp.
    pub fn at(ranking: &Ranking<'_>, metrics: &[ScoreField], generated_at: DateTime<Utc>) -> Self {
        let rows = ranking
            .iter()
            .enumerate()
            .map(|(i, entry)| RankingRow {
                rank: i + 1,
                symbol: entry.record.symbol.clone(),
                name: entry.record.display_name().map(str::to_string),
                sector: entry.record.sector.clone(),
                industry: entry.record.industry.clone(),
                total_score: entry.total_score,
                average_score: entry.average_score,
                scores: entry.metric_scores.clone(),
            })
            .collect();

        Self {
            generated_at,
            metrics: metrics.to_vec(),
            matched: ranking.matched,
            rows,
        }
    }
}

impl Exporter for RankingExport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);

                let mut header: Vec<&str> = vec![
                    "rank",
                    "symbol",
                    "name",
                    "sector",
                    "industry",
                    "total_score",
                    "average_score",
                ];
                header.extend(self.metrics.iter().map(ScoreField::column));
                wtr.write_record(&header)?;

                for row in &self.rows {
                    let mut record = vec![
                        row.rank.to_string(),
                        row.symbol.clone(),
                        row.name.clone().unwrap_or_default(),
                        row.sector.clone().unwrap_or_default(),
                        row.industry.clone().unwrap_or_default(),
                        row.total_score.to_string(),
                        row.average_score.to_string(),
                    ];
                    record.extend(self.metrics.iter().map(|&field| {
                        cell(row.scores.iter().find(|m| m.field == field).map(|m| m.score))
                    }));
                    wtr.write_record(&record)?;
                }
                finish(wtr)
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

/// One row of an exported neighbour list.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NeighborRow {
    /// Ticker symbol.
    pub symbol: String,
    /// Short name, or long name when absent.
    pub name: Option<String>,
    /// Sector name.
    pub sector: Option<String>,
    /// Industry name.
    pub industry: Option<String>,
    /// Euclidean distance to the target.
    pub distance: f64,
}

/// Snapshot of the companies most similar to a target.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NeighborExport {
    /// When the snapshot was taken.
    pub generated_at: DateTime<Utc>,
    /// Target symbol.
    pub target: String,
    /// Score fields spanning the comparison space.
    pub metrics: Vec<ScoreField>,
    /// Neighbours, closest first.
    pub rows: Vec<NeighborRow>,
}

impl NeighborExport {
    /// Snapshot `neighbors` of `target` now.
    pub fn new(target: &Record, neighbors: &[Neighbor<'_>], metrics: &[ScoreField]) -> Self {
        Self::at(target, neighbors, metrics, Utc::now())
    }

    /// Snapshot with an explicit timestamp.
    pub fn at(
        target: &Record,
        neighbors: &[Neighbor<'_>],
        metrics: &[ScoreField],
        generated_at: DateTime<Utc>,
    ) -> Self {
        let rows = neighbors
            .iter()
            .map(|n| NeighborRow {
                symbol: n.peer.symbol.clone(),
                name: n.peer.display_name().map(str::to_string),
                sector: n.peer.sector.clone(),
                industry: n.peer.industry.clone(),
                distance: n.distance,
            })
            .collect();

        Self {
            generated_at,
            target: target.symbol.clone(),
            metrics: metrics.to_vec(),
            rows,
        }
    }
}

impl Exporter for NeighborExport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                for row in &self.rows {
                    wtr.serialize(row)?;
                }
                finish(wtr)
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

/// Write `records` as a dataset CSV: descriptive, raw and score columns in
/// canonical order. Missing values are empty cells.
///
/// # Errors
///
/// Returns an error if the CSV writer fails.
pub fn write_dataset_csv<W: Write>(records: &[Record], writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);

    let header: Vec<&str> = TextField::ALL
        .iter()
        .map(TextField::column)
        .chain(RawField::ALL.iter().map(RawField::column))
        .chain(ScoreField::ALL.iter().map(ScoreField::column))
        .collect();
    wtr.write_record(&header)?;

    for record in records {
        let row: Vec<String> = TextField::ALL
            .iter()
            .map(|&f| record.text(f).unwrap_or_default().to_string())
            .chain(RawField::ALL.iter().map(|&f| cell(record.raw(f))))
            .chain(ScoreField::ALL.iter().map(|&f| cell(record.score(f))))
            .collect();
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use peerscope_data::load_csv;
    use peerscope_engine::{nearest, rank};

    fn pool() -> Vec<Record> {
        vec![
            Record::new("AAPL")
                .with_short_name("Apple Inc.")
                .with_classification("Technology", "Consumer Electronics")
                .with_raw(RawField::Eps, Some(6.08))
                .with_score(ScoreField::Eps, Some(80.0))
                .with_score(ScoreField::Roe, Some(99.0)),
            Record::new("XOM").with_score(ScoreField::Eps, Some(90.0)),
        ]
    }

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn test_ranking_export_csv() {
        let pool = pool();
        let fields = [ScoreField::Eps, ScoreField::Roe];
        let ranking = rank(&pool, &fields, None, 10).unwrap();
        let export = RankingExport::at(&ranking, &fields, timestamp());

        let csv = export.export_to_string(ExportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "rank,symbol,name,sector,industry,total_score,average_score,EPS Score,ROE Score"
        );
        assert_eq!(
            lines[1],
            "1,AAPL,Apple Inc.,Technology,Consumer Electronics,179,89.5,80,99"
        );
        assert_eq!(lines[2], "2,XOM,,,,140,70,90,50");
    }

    #[test]
    fn test_ranking_export_json() {
        let pool = pool();
        let fields = [ScoreField::Eps];
        let ranking = rank(&pool, &fields, None, 1).unwrap();
        let export = RankingExport::at(&ranking, &fields, timestamp());

        let json = export.export_to_string(ExportFormat::Json).unwrap();
        assert!(json.contains("\"generated_at\":\"2024-01-02T03:04:05Z\""));
        assert!(json.contains("\"metrics\":[\"EPS Score\"]"));
        assert!(json.contains("\"matched\":2"));
        assert!(json.contains("\"symbol\":\"XOM\""));

        let pretty = export.export_to_string(ExportFormat::PrettyJson).unwrap();
        assert!(pretty.contains("  "));
    }

    #[test]
    fn test_neighbor_export_csv() {
        let pool = pool();
        let fields = [ScoreField::Eps];
        let peers = nearest(&pool[0], &pool, &fields, 5).unwrap();
        let export = NeighborExport::at(&pool[0], &peers, &fields, timestamp());

        assert_eq!(export.target, "AAPL");
        let csv = export.export_to_string(ExportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "symbol,name,sector,industry,distance");
        assert_eq!(lines[1], "XOM,,,,10.0");
    }

    #[test]
    fn test_dataset_csv_reloads() {
        let pool = pool();
        let mut buffer = Vec::new();
        write_dataset_csv(&pool, &mut buffer).unwrap();

        let reloaded = load_csv(buffer.as_slice()).unwrap();
        assert_eq!(reloaded, pool);
    }

    #[test]
    fn test_export_to_file() {
        let pool = pool();
        let ranking = rank(&pool, &[ScoreField::Eps], None, 10).unwrap();
        let export = RankingExport::new(&ranking, &[ScoreField::Eps]);

        let path = std::env::temp_dir().join("peerscope_ranking_export.json");
        export.export_to_file(&path, ExportFormat::Json).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"AAPL\""));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_export_format() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::PrettyJson.extension(), "json");
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!(matches!(
            "xml".parse::<ExportFormat>(),
            Err(ExportError::InvalidFormat(f)) if f == "xml"
        ));
    }
}
