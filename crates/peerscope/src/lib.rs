#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/peerscope/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod query;
pub mod selection;
pub mod session;

// Re-export main types from sub-crates
pub use peerscope_data as data;
pub use peerscope_engine as engine;
pub use peerscope_output as output;
pub use peerscope_scores as scores;

pub use error::{DashboardError, Result};
pub use query::QueryState;
pub use selection::{MIN_ACTIVE_METRICS, MetricSelection};
pub use session::{
    DEFAULT_SYMBOL, DEFAULT_TOP_N, MIN_TOP_N, Session, SessionConfig, TYPEAHEAD_LIMIT,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
