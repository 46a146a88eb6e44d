//! Log subscriber setup.

use crate::error::CliError;
use tracing_subscriber::{EnvFilter, fmt};

/// Install a stderr subscriber. `RUST_LOG` wins over `level`.
pub(crate) fn init(level: &str) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| CliError::Logging(e.to_string()))?;

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}
