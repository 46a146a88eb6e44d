//! `peerscope metrics`: the score registry.

use crate::config::AppConfig;
use crate::error::CliError;
use peerscope_output::DisplayFormat;
use peerscope_scores::{Transform, available_metrics};

pub(crate) fn run(config: &AppConfig) -> Result<(), CliError> {
    let metrics = available_metrics();

    println!("\nAvailable score fields ({})", metrics.len());
    println!("{}", "=".repeat(100));
    println!(
        "{:<3} {:<22} {:<10} {:<10} {}",
        "", "Field", "Direction", "Transform", "Description"
    );
    println!("{}", "-".repeat(100));

    for info in metrics {
        let active = config.metrics.is_empty() || config.metrics.contains(&info.field);
        let transform = match info.transform {
            Some(Transform::Log) => "log",
            None => "-",
        };
        let direction = if info.higher_is_better {
            "higher"
        } else {
            "lower"
        };
        println!(
            "{:<3} {:<22} {:<10} {:<10} {}",
            if active { "[x]" } else { "[ ]" },
            info.field.column(),
            direction,
            transform,
            info.description
        );
        let display = match DisplayFormat::for_score(info.field) {
            DisplayFormat::Currency => "currency".to_string(),
            DisplayFormat::Percent { .. } => "percent".to_string(),
            DisplayFormat::Number { decimals } => format!("number ({decimals} dp)"),
        };
        println!("{:<3} {:<22} raw column {:?}, shown as {}", "", "", info.field.label(), display);
    }

    println!("{}", "=".repeat(100));
    println!("Scores are percentile ranks on a 0-100 scale; missing scores count as 50.");
    Ok(())
}
