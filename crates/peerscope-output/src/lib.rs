#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/peerscope/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod chart;
pub mod export;
pub mod format;
pub mod table;

pub use chart::{RadarReading, radar_readings, render_bars};
pub use export::{
    ExportError, ExportFormat, Exporter, NeighborExport, NeighborRow, RankingExport, RankingRow,
    write_dataset_csv,
};
pub use format::{DisplayFormat, PercentScale, format_currency, format_number, format_percent};
pub use table::{details_table, neighbors_table, ranking_summary, ranking_table};
