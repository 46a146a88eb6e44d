//! Display formatting for raw metric values.
//!
//! Each raw metric carries explicit display metadata. Values are never
//! reinterpreted based on their magnitude.

use peerscope_data::{RawField, ScoreField};
use serde::{Deserialize, Serialize};

/// Unit in which a percentage is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PercentScale {
    /// Stored as a fraction: `0.12` is 12%.
    Fraction,
    /// Stored in percentage points: `12.0` is 12%.
    Points,
}

/// How a raw metric is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayFormat {
    /// US dollars, thousands separators, no decimals.
    Currency,
    /// Percentage with up to two decimals.
    Percent {
        /// Storage unit of the value.
        scale: PercentScale,
    },
    /// Plain number with a fixed number of decimals.
    Number {
        /// Decimal places.
        decimals: usize,
    },
}

impl DisplayFormat {
    /// Display metadata for a raw metric.
    pub const fn for_raw(field: RawField) -> Self {
        match field {
            RawField::CurrentPrice | RawField::MarketCap | RawField::Ebitda => Self::Currency,
            RawField::RevenueGrowth | RawField::Weight | RawField::Roe => Self::Percent {
                scale: PercentScale::Fraction,
            },
            RawField::DividendYield => Self::Percent {
                scale: PercentScale::Points,
            },
            RawField::PriceToBook | RawField::PriceToEarnings | RawField::Eps => {
                Self::Number { decimals: 2 }
            }
        }
    }

    /// Display metadata for the raw metric behind a score.
    pub const fn for_score(field: ScoreField) -> Self {
        Self::for_raw(field.raw_field())
    }

    /// Render `value`, or `None` when it is not finite.
    pub fn format(&self, value: f64) -> Option<String> {
        if !value.is_finite() {
            return None;
        }
        let text = match self {
            Self::Currency => format_currency(value),
            Self::Percent { scale } => {
                let fraction = match scale {
                    PercentScale::Fraction => value,
                    PercentScale::Points => value / 100.0,
                };
                format_percent(fraction)
            }
            Self::Number { decimals } => format_number(value, *decimals),
        };
        Some(text)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `1234567.8` → `"$1,234,568"`.
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    format!("{sign}${}", group_thousands(&digits))
}

/// `0.12346` → `"12.35%"`. Trailing zeros are dropped.
pub fn format_percent(fraction: f64) -> String {
    let points = format!("{:.2}", fraction * 100.0);
    let trimmed = points.trim_end_matches('0').trim_end_matches('.');
    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed),
    };
    let (int, frac) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };
    let sign = if int == "0" && frac.is_none() { "" } else { sign };
    match frac {
        Some(frac) => format!("{sign}{}.{frac}%", group_thousands(int)),
        None => format!("{sign}{}%", group_thousands(int)),
    }
}

/// Fixed-decimal rendering: `format_number(12.346, 2)` → `"12.35"`.
pub fn format_number(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}
