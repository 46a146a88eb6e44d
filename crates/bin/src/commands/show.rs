//! `peerscope show`: company details, metric profile and similar companies.

use super::{OutputFormat, load_session};
use crate::config::AppConfig;
use crate::error::CliError;
use peerscope::{DashboardError, QueryState};
use peerscope_output::{
    Exporter, NeighborExport, details_table, neighbors_table, radar_readings, render_bars,
};
use tracing::warn;

const BAR_WIDTH: usize = 40;

pub(crate) async fn run(
    config: &AppConfig,
    symbol: Option<&str>,
    query: Option<&str>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let mut session = load_session(config).await?;
    let query = QueryState::parse(query.unwrap_or_default());

    match symbol {
        Some(text) => {
            session.commit_search(text)?;
        }
        None => {
            if session.resolve_initial(&query).is_none() {
                return Err(DashboardError::EmptyResultSet(
                    "The dataset contains no companies.".to_string(),
                )
                .into());
            }
        }
    }

    let fields = session.active_fields();
    let similar = match session.similar() {
        Ok(neighbors) => neighbors,
        Err(e) if e.is_recoverable() => {
            warn!(error = %e, "no similar companies");
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };
    let record = session
        .selected()
        .ok_or_else(|| DashboardError::EmptyResultSet("No company selected.".to_string()))?;

    if let Some(export) = format.export() {
        let report = NeighborExport::new(record, &similar, &fields);
        println!("{}", report.export_to_string(export)?);
        return Ok(());
    }

    print!("{}", details_table(record));

    let readings = radar_readings(record, &fields);
    println!("\nMetric profile");
    print!("{}", render_bars(&readings, BAR_WIDTH));
    if readings.iter().any(|r| r.is_fallback) {
        println!("* score unavailable, plotted at the neutral default");
    }
    println!();
    for reading in &readings {
        let [score, raw] = reading.tooltip_lines();
        println!("  {score:<28} {raw}");
    }

    if similar.is_empty() {
        println!("\nNo similar companies found for this selection.");
    } else {
        print!("{}", neighbors_table(record, &similar));
    }

    println!("\nLink: {}", session.update_query(query).to_query_string());
    Ok(())
}
