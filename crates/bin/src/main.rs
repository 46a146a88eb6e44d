//! Peerscope CLI binary.
//!
//! Explore a scored company dataset from the terminal: inspect a company and
//! its closest peers, rank companies by a blend of metrics, and score raw
//! fundamentals files.

mod commands;
mod config;
mod error;
mod logging;

use clap::{Parser, Subcommand};
use commands::OutputFormat;
use config::AppConfig;
use error::CliError;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "peerscope")]
#[command(about = "Peerscope: compare S&P 500 companies by metric scores", long_about = None)]
#[command(version)]
struct Cli {
    /// Dataset location: a CSV path or an http(s) URL
    #[arg(long, global = true)]
    data: Option<String>,

    /// Comma-separated score fields to use (default: all)
    #[arg(long, global = true)]
    metrics: Option<String>,

    /// Configuration file (default: <config dir>/peerscope/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the score fields and how they are derived
    Metrics,

    /// Show a company, its metric profile and its most similar peers
    Show {
        /// Symbol or company name (default: taken from --query, then AAPL)
        symbol: Option<String>,

        /// Addressable state, e.g. "?symbol=MSFT"
        #[arg(long)]
        query: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Rank companies by the sum of the selected scores
    Rank {
        /// Only rank companies whose symbol, name, sector or industry
        /// contains this text
        #[arg(long)]
        search: Option<String>,

        /// Number of companies to show (10 to dataset size)
        #[arg(long)]
        top: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Compute percentile scores for a fundamentals CSV
    Score {
        /// Input CSV with the raw metric columns
        input: PathBuf,

        /// Output path (default: overwrite the input)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.data = data;
    }
    if let Some(metrics) = cli.metrics.as_deref() {
        config.metrics = commands::parse_metrics(metrics)?;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    logging::init(&config.log_level)?;

    match cli.command {
        Commands::Metrics => commands::metrics::run(&config),
        Commands::Show {
            symbol,
            query,
            format,
        } => commands::show::run(&config, symbol.as_deref(), query.as_deref(), format).await,
        Commands::Rank {
            search,
            top,
            format,
        } => commands::rank::run(&config, search.as_deref(), top, format).await,
        Commands::Score { input, output } => commands::score::run(&input, output.as_deref()),
    }
}
