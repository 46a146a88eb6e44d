//! `peerscope rank`: blended ranking over the selected metrics.

use super::{OutputFormat, load_session};
use crate::config::AppConfig;
use crate::error::CliError;
use peerscope_output::{Exporter, RankingExport, ranking_summary, ranking_table};
use tracing::debug;

pub(crate) async fn run(
    config: &AppConfig,
    search: Option<&str>,
    top: Option<usize>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let mut session = load_session(config).await?;

    if let Some(text) = search {
        session.set_search(text);
    }
    if let Some(requested) = top {
        let limit = session.set_ranking_limit(requested);
        if limit != requested {
            debug!(requested, limit, "ranking size clamped");
        }
    }

    let fields = session.active_fields();
    let ranking = session.rankings()?;

    match format.export() {
        Some(export) => {
            let report = RankingExport::new(&ranking, &fields);
            println!("{}", report.export_to_string(export)?);
        }
        None => {
            print!("{}", ranking_table(&ranking, &fields));
            println!("{}", ranking_summary(&ranking, &fields));
        }
    }
    Ok(())
}
