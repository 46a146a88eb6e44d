#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/peerscope/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod dataset;
pub mod error;
pub mod loader;
pub mod record;
pub mod schema;
pub mod source;

pub use dataset::Dataset;
pub use error::{DataError, Result};
pub use loader::{RawRow, load, load_csv, parse_number};
pub use record::Record;
pub use schema::{RawField, SCORE_FALLBACK, ScoreField, TextField};
pub use source::{DatasetSource, fetch_dataset};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
