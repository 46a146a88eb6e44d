//! `peerscope score`: add percentile score columns to a fundamentals CSV.

use crate::error::CliError;
use peerscope_scores::{ScoreTable, available_metrics};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::debug;

pub(crate) fn run(input: &Path, output: Option<&Path>) -> Result<(), CliError> {
    // Fully read before the output is created, so scoring in place is safe.
    let mut table = ScoreTable::from_reader(BufReader::new(File::open(input)?))?;
    let scored = table.score()?;
    debug!(scored = scored.len(), rows = table.len(), "scored input");

    let output = output.unwrap_or(input);
    table.write(BufWriter::new(File::create(output)?))?;

    println!(
        "Scores added for {} metrics. Saved to {}",
        available_metrics().len(),
        output.display()
    );
    Ok(())
}
