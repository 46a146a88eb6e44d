//! Radar chart readings.
//!
//! One reading per selected score axis, holding the plotted score and the raw
//! metric behind it.

use crate::format::DisplayFormat;
use peerscope_data::{Record, SCORE_FALLBACK, ScoreField};
use serde::Serialize;

/// A single radar axis for one company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarReading {
    /// Score field on this axis.
    pub field: ScoreField,
    /// Axis label (the score name without ` Score`).
    pub label: &'static str,
    /// Plotted score, the fallback when the record has none.
    pub score: f64,
    /// Whether `score` is the fallback.
    pub is_fallback: bool,
    /// Raw metric value behind the score.
    pub raw: Option<f64>,
    /// Raw value rendered with the metric's display format.
    pub formatted_raw: Option<String>,
}

impl RadarReading {
    /// Build the reading for `field` of `record`.
    pub fn new(record: &Record, field: ScoreField) -> Self {
        let score = record.score(field);
        let raw = record.raw(field.raw_field());
        Self {
            field,
            label: field.label(),
            score: score.unwrap_or(SCORE_FALLBACK),
            is_fallback: score.is_none(),
            raw,
            formatted_raw: raw.and_then(|v| DisplayFormat::for_score(field).format(v)),
        }
    }

    /// Tooltip text: the score line and the raw value line.
    pub fn tooltip_lines(&self) -> [String; 2] {
        let score_line = format!("{}: {:.1}", self.label, self.score);
        let raw_line = match &self.formatted_raw {
            Some(text) => format!("Raw: {text}"),
            None => format!("Raw: Unavailable (defaulted to {SCORE_FALLBACK})"),
        };
        [score_line, raw_line]
    }
}

/// Readings for `fields`, in the order given.
pub fn radar_readings(record: &Record, fields: &[ScoreField]) -> Vec<RadarReading> {
    fields
        .iter()
        .map(|&field| RadarReading::new(record, field))
        .collect()
}

/// Horizontal bar rendering of readings on a 0-100 scale.
///
/// Fallback scores are marked with `*`.
pub fn render_bars(readings: &[RadarReading], width: usize) -> String {
    let label_width = readings.iter().map(|r| r.label.len()).max().unwrap_or(0);
    let mut output = String::new();

    for reading in readings {
        let filled = ((reading.score.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
        output.push_str(&format!(
            "{:<label_width$}  {}{} {:>5.1}{}\n",
            reading.label,
            "#".repeat(filled),
            ".".repeat(width - filled),
            reading.score,
            if reading.is_fallback { "*" } else { "" },
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use peerscope_data::RawField;

    fn record() -> Record {
        Record::new("AAPL")
            .with_raw(RawField::MarketCap, Some(3_000_000_000_000.0))
            .with_score(ScoreField::MarketCap, Some(99.8))
            .with_raw(RawField::PriceToEarnings, Some(31.456))
            .with_score(ScoreField::Roe, Some(87.5))
    }

    #[test]
    fn test_readings_follow_field_order() {
        let fields = [ScoreField::Roe, ScoreField::MarketCap];
        let readings = radar_readings(&record(), &fields);
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].label, "ROE");
        assert_eq!(readings[1].label, "Marketcap");
    }

    #[test]
    fn test_fallback_reading() {
        let reading = RadarReading::new(&record(), ScoreField::PriceToEarnings);
        assert!(reading.is_fallback);
        assert_relative_eq!(reading.score, 50.0);
        assert_eq!(reading.formatted_raw.as_deref(), Some("31.46"));
    }

    #[test]
    fn test_tooltip_with_raw_value() {
        let reading = RadarReading::new(&record(), ScoreField::MarketCap);
        let [score, raw] = reading.tooltip_lines();
        assert_eq!(score, "Marketcap: 99.8");
        assert_eq!(raw, "Raw: $3,000,000,000,000");
    }

    #[test]
    fn test_tooltip_without_raw_value() {
        let reading = RadarReading::new(&record(), ScoreField::Roe);
        let [score, raw] = reading.tooltip_lines();
        assert_eq!(score, "ROE: 87.5");
        assert_eq!(raw, "Raw: Unavailable (defaulted to 50)");
    }

    #[test]
    fn test_render_bars() {
        let readings = radar_readings(&record(), &[ScoreField::Roe, ScoreField::Eps]);
        let bars = render_bars(&readings, 10);
        let lines: Vec<&str> = bars.lines().collect();
        assert_eq!(lines[0], "ROE  #########.  87.5");
        assert_eq!(lines[1], "EPS  #####.....  50.0*");
    }
}
