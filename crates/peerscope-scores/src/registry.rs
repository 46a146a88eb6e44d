//! Score Registry
//!
//! Central table of the scored metrics: which raw metric feeds each score,
//! whether a higher raw value is better, and which transform runs first.

use peerscope_data::ScoreField;
use serde::{Deserialize, Serialize};

/// Transform applied to a raw metric before ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transform {
    /// Natural logarithm; non-positive values become missing
    Log,
}

impl Transform {
    /// Apply the transform to one value.
    pub fn apply(&self, value: Option<f64>) -> Option<f64> {
        match self {
            Self::Log => value.filter(|v| *v > 0.0).map(f64::ln),
        }
    }
}

/// Scored metric metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreMetricInfo {
    /// Score column produced
    pub field: ScoreField,
    /// Whether a larger raw value earns a larger score
    pub higher_is_better: bool,
    /// Transform applied before ranking
    pub transform: Option<Transform>,
    /// Brief description of what the metric measures
    pub description: &'static str,
}

/// Get all scored metrics in canonical order
pub fn available_metrics() -> Vec<ScoreMetricInfo> {
    vec![
        ScoreMetricInfo {
            field: ScoreField::MarketCap,
            higher_is_better: true,
            transform: Some(Transform::Log),
            description: "Market capitalization (log scale)",
        },
        ScoreMetricInfo {
            field: ScoreField::Ebitda,
            higher_is_better: true,
            transform: Some(Transform::Log),
            description: "Earnings before interest, taxes, depreciation and amortization (log scale)",
        },
        ScoreMetricInfo {
            field: ScoreField::RevenueGrowth,
            higher_is_better: true,
            transform: None,
            description: "Year-over-year revenue growth",
        },
        ScoreMetricInfo {
            field: ScoreField::Weight,
            higher_is_better: true,
            transform: None,
            description: "Weight in the index",
        },
        ScoreMetricInfo {
            field: ScoreField::PriceToBook,
            higher_is_better: false,
            transform: None,
            description: "Price to book ratio (cheaper is better)",
        },
        ScoreMetricInfo {
            field: ScoreField::PriceToEarnings,
            higher_is_better: false,
            transform: None,
            description: "Price to earnings ratio (cheaper is better)",
        },
        ScoreMetricInfo {
            field: ScoreField::DividendYield,
            higher_is_better: true,
            transform: None,
            description: "Trailing dividend yield",
        },
        ScoreMetricInfo {
            field: ScoreField::Eps,
            higher_is_better: true,
            transform: None,
            description: "Trailing earnings per share",
        },
        ScoreMetricInfo {
            field: ScoreField::Roe,
            higher_is_better: true,
            transform: None,
            description: "Return on equity",
        },
    ]
}

/// Get metric info by score field
pub fn get_metric_info(field: ScoreField) -> Option<ScoreMetricInfo> {
    available_metrics().into_iter().find(|m| m.field == field)
}

/// Get metrics where a higher (or lower) raw value is better
pub fn metrics_by_direction(higher_is_better: bool) -> Vec<ScoreMetricInfo> {
    available_metrics()
        .into_iter()
        .filter(|m| m.higher_is_better == higher_is_better)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_score_field_registered_once() {
        let metrics = available_metrics();
        assert_eq!(metrics.len(), ScoreField::COUNT);
        let fields: Vec<ScoreField> = metrics.iter().map(|m| m.field).collect();
        assert_eq!(fields, ScoreField::ALL.to_vec());
    }

    #[test]
    fn test_lower_is_better_metrics() {
        let lower: Vec<ScoreField> = metrics_by_direction(false)
            .into_iter()
            .map(|m| m.field)
            .collect();
        assert_eq!(
            lower,
            vec![ScoreField::PriceToBook, ScoreField::PriceToEarnings]
        );
        assert_eq!(metrics_by_direction(true).len(), 7);
    }

    #[test]
    fn test_get_metric_info() {
        let info = get_metric_info(ScoreField::MarketCap).unwrap();
        assert_eq!(info.transform, Some(Transform::Log));
        assert!(info.higher_is_better);
        assert!(get_metric_info(ScoreField::Eps).unwrap().transform.is_none());
    }

    #[test]
    fn test_log_transform() {
        let log = Transform::Log;
        assert_eq!(log.apply(Some(1.0)), Some(0.0));
        assert!(log.apply(Some(0.0)).is_none());
        assert!(log.apply(Some(-5.0)).is_none());
        assert!(log.apply(None).is_none());
    }
}
