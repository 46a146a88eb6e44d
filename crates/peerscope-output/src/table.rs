//! Plain-text tables.

use crate::format::DisplayFormat;
use peerscope_data::{RawField, Record, ScoreField};
use peerscope_engine::{Neighbor, Ranking};

const NAME_UNAVAILABLE: &str = "Name unavailable";
const SECTOR_UNAVAILABLE: &str = "Sector unavailable";

/// Raw metrics listed in a company detail block, in display order.
const DETAIL_FIELDS: [(&str, RawField); 7] = [
    ("Current Price", RawField::CurrentPrice),
    ("Market Cap", RawField::MarketCap),
    ("Weight", RawField::Weight),
    ("P/B Ratio", RawField::PriceToBook),
    ("P/E Ratio", RawField::PriceToEarnings),
    ("Dividend Yield", RawField::DividendYield),
    ("ROE", RawField::Roe),
];

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

fn metric_names(fields: &[ScoreField]) -> String {
    fields
        .iter()
        .map(ScoreField::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Headline for a ranking: how many entries are shown out of how many matched.
pub fn ranking_summary(ranking: &Ranking<'_>, fields: &[ScoreField]) -> String {
    format!(
        "Showing top {} of {} companies · Metrics: {}",
        ranking.len(),
        ranking.matched,
        metric_names(fields)
    )
}

/// Render a ranking as a table with one row per entry and a score breakdown.
pub fn ranking_table(ranking: &Ranking<'_>, fields: &[ScoreField]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\nBlended rankings across {} metric{}\n",
        fields.len(),
        if fields.len() == 1 { "" } else { "s" }
    ));
    output.push_str(&ranking_summary(ranking, fields));
    output.push('\n');
    output.push_str(&"=".repeat(96));
    output.push('\n');

    output.push_str(&format!(
        "{:>4}  {:<8} {:<28} {:<34} {:>8} {:>8}\n",
        "Rank", "Symbol", "Name", "Sector", "Total", "Avg"
    ));
    output.push_str(&"-".repeat(96));
    output.push('\n');

    for (i, entry) in ranking.iter().enumerate() {
        let record = entry.record;
        output.push_str(&format!(
            "{:>4}  {:<8} {:<28} {:<34} {:>8.1} {:>8.1}\n",
            i + 1,
            record.symbol,
            truncate(record.display_name().unwrap_or(NAME_UNAVAILABLE), 28),
            truncate(
                record
                    .classification()
                    .as_deref()
                    .unwrap_or(SECTOR_UNAVAILABLE),
                34
            ),
            entry.total_score,
            entry.average_score,
        ));

        let breakdown: Vec<String> = entry
            .metric_scores
            .iter()
            .map(|m| {
                format!(
                    "{} {:.1}{}",
                    m.field.label(),
                    m.score,
                    if m.is_fallback { "*" } else { "" }
                )
            })
            .collect();
        output.push_str(&format!("{:>6}{}\n", "", breakdown.join(" | ")));
    }

    output.push_str(&"=".repeat(96));
    output.push('\n');
    output
}

/// Render the neighbours of `target`, closest first.
pub fn neighbors_table(target: &Record, neighbors: &[Neighbor<'_>]) -> String {
    let mut output = String::new();

    output.push_str(&format!("\nCompanies similar to {}\n", target.symbol));
    output.push_str(&"=".repeat(80));
    output.push('\n');
    output.push_str(&format!(
        "{:<8} {:<28} {:<30} {:>10}\n",
        "Symbol", "Name", "Sector", "Distance"
    ));
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for neighbor in neighbors {
        let peer = neighbor.peer;
        output.push_str(&format!(
            "{:<8} {:<28} {:<30} {:>10.2}\n",
            peer.symbol,
            truncate(peer.short_name.as_deref().unwrap_or("N/A"), 28),
            truncate(
                &format!(
                    "{} · {}",
                    peer.sector.as_deref().unwrap_or("Unknown sector"),
                    peer.industry.as_deref().unwrap_or("Unknown industry")
                ),
                30
            ),
            neighbor.distance,
        ));
    }

    output.push_str(&"=".repeat(80));
    output.push('\n');
    output.push_str("Similarity distance: lower is more similar\n");
    output
}

/// Render the detail block of a company. Missing values are omitted.
pub fn details_table(record: &Record) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{} ({})\n",
        record.symbol,
        record.short_name.as_deref().unwrap_or("N/A")
    ));
    if let Some(classification) = record.classification() {
        output.push_str(&classification);
        output.push('\n');
    }
    output.push_str(&"-".repeat(40));
    output.push('\n');

    if let Some(exchange) = &record.exchange {
        output.push_str(&format!("{:<16} {}\n", "Exchange", exchange));
    }
    for (label, field) in DETAIL_FIELDS {
        let Some(text) = record
            .raw(field)
            .and_then(|v| DisplayFormat::for_raw(field).format(v))
        else {
            continue;
        };
        output.push_str(&format!("{label:<16} {text}\n"));
    }
    output
}
