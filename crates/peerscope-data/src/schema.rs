//! Fixed dataset schema.
//!
//! The dataset carries six descriptive columns, ten raw numeric columns and
//! nine score columns. Column names match the CSV header exactly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Score substituted for a missing value when a computation needs one.
///
/// Scores live on a 0-100 scale, so a missing metric is treated as average.
pub const SCORE_FALLBACK: f64 = 50.0;

/// Descriptive (non-numeric) columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    /// Ticker symbol, the unique identifier
    Symbol,
    /// Short company name
    ShortName,
    /// Long company name
    LongName,
    /// Sector name
    Sector,
    /// Industry name
    Industry,
    /// Listing exchange
    Exchange,
}

impl TextField {
    /// All descriptive columns in header order.
    pub const ALL: [Self; 6] = [
        Self::Symbol,
        Self::ShortName,
        Self::LongName,
        Self::Sector,
        Self::Industry,
        Self::Exchange,
    ];

    /// CSV column name.
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Symbol => "Symbol",
            Self::ShortName => "Shortname",
            Self::LongName => "Longname",
            Self::Sector => "Sector",
            Self::Industry => "Industry",
            Self::Exchange => "Exchange",
        }
    }
}

/// Raw financial metrics as reported by the data vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RawField {
    /// Current share price
    #[serde(rename = "Currentprice")]
    CurrentPrice,
    /// Market capitalization
    #[serde(rename = "Marketcap")]
    MarketCap,
    /// EBITDA
    #[serde(rename = "Ebitda")]
    Ebitda,
    /// Year-over-year revenue growth
    #[serde(rename = "Revenuegrowth")]
    RevenueGrowth,
    /// Weight in the index
    #[serde(rename = "Weight")]
    Weight,
    /// Price to book ratio
    #[serde(rename = "P/B Ratio")]
    PriceToBook,
    /// Price to earnings ratio
    #[serde(rename = "P/E Ratio")]
    PriceToEarnings,
    /// Dividend yield
    #[serde(rename = "Dividend Yield")]
    DividendYield,
    /// Earnings per share
    #[serde(rename = "EPS")]
    Eps,
    /// Return on equity
    #[serde(rename = "ROE")]
    Roe,
}

impl RawField {
    /// Number of raw fields.
    pub const COUNT: usize = 10;

    /// All raw fields in header order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::CurrentPrice,
        Self::MarketCap,
        Self::Ebitda,
        Self::RevenueGrowth,
        Self::Weight,
        Self::PriceToBook,
        Self::PriceToEarnings,
        Self::DividendYield,
        Self::Eps,
        Self::Roe,
    ];

    /// Position in [`Self::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// CSV column name.
    pub const fn column(&self) -> &'static str {
        match self {
            Self::CurrentPrice => "Currentprice",
            Self::MarketCap => "Marketcap",
            Self::Ebitda => "Ebitda",
            Self::RevenueGrowth => "Revenuegrowth",
            Self::Weight => "Weight",
            Self::PriceToBook => "P/B Ratio",
            Self::PriceToEarnings => "P/E Ratio",
            Self::DividendYield => "Dividend Yield",
            Self::Eps => "EPS",
            Self::Roe => "ROE",
        }
    }

    /// The score derived from this metric, if any.
    pub const fn score_field(&self) -> Option<ScoreField> {
        match self {
            Self::CurrentPrice => None,
            Self::MarketCap => Some(ScoreField::MarketCap),
            Self::Ebitda => Some(ScoreField::Ebitda),
            Self::RevenueGrowth => Some(ScoreField::RevenueGrowth),
            Self::Weight => Some(ScoreField::Weight),
            Self::PriceToBook => Some(ScoreField::PriceToBook),
            Self::PriceToEarnings => Some(ScoreField::PriceToEarnings),
            Self::DividendYield => Some(ScoreField::DividendYield),
            Self::Eps => Some(ScoreField::Eps),
            Self::Roe => Some(ScoreField::Roe),
        }
    }
}

impl fmt::Display for RawField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// Pre-normalized 0-100 scores, one per scored raw metric.
///
/// Declaration order is the canonical order used whenever fields are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScoreField {
    /// Market capitalization score
    #[serde(rename = "Marketcap Score")]
    MarketCap,
    /// EBITDA score
    #[serde(rename = "Ebitda Score")]
    Ebitda,
    /// Revenue growth score
    #[serde(rename = "Revenuegrowth Score")]
    RevenueGrowth,
    /// Index weight score
    #[serde(rename = "Weight Score")]
    Weight,
    /// Price to book score
    #[serde(rename = "P/B Ratio Score")]
    PriceToBook,
    /// Price to earnings score
    #[serde(rename = "P/E Ratio Score")]
    PriceToEarnings,
    /// Dividend yield score
    #[serde(rename = "Dividend Yield Score")]
    DividendYield,
    /// Earnings per share score
    #[serde(rename = "EPS Score")]
    Eps,
    /// Return on equity score
    #[serde(rename = "ROE Score")]
    Roe,
}

impl ScoreField {
    /// Number of score fields.
    pub const COUNT: usize = 9;

    /// All score fields in canonical order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::MarketCap,
        Self::Ebitda,
        Self::RevenueGrowth,
        Self::Weight,
        Self::PriceToBook,
        Self::PriceToEarnings,
        Self::DividendYield,
        Self::Eps,
        Self::Roe,
    ];

    /// Position in [`Self::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// CSV column name.
    pub const fn column(&self) -> &'static str {
        match self {
            Self::MarketCap => "Marketcap Score",
            Self::Ebitda => "Ebitda Score",
            Self::RevenueGrowth => "Revenuegrowth Score",
            Self::Weight => "Weight Score",
            Self::PriceToBook => "P/B Ratio Score",
            Self::PriceToEarnings => "P/E Ratio Score",
            Self::DividendYield => "Dividend Yield Score",
            Self::Eps => "EPS Score",
            Self::Roe => "ROE Score",
        }
    }

    /// The raw metric this score is derived from.
    pub const fn raw_field(&self) -> RawField {
        match self {
            Self::MarketCap => RawField::MarketCap,
            Self::Ebitda => RawField::Ebitda,
            Self::RevenueGrowth => RawField::RevenueGrowth,
            Self::Weight => RawField::Weight,
            Self::PriceToBook => RawField::PriceToBook,
            Self::PriceToEarnings => RawField::PriceToEarnings,
            Self::DividendYield => RawField::DividendYield,
            Self::Eps => RawField::Eps,
            Self::Roe => RawField::Roe,
        }
    }

    /// Axis label: the raw metric name without the ` Score` suffix.
    pub const fn label(&self) -> &'static str {
        self.raw_field().column()
    }
}

impl fmt::Display for ScoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

fn normalize_name(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    let stem = lower.strip_suffix("score").unwrap_or(&lower);
    stem.chars().filter(|c| !c.is_whitespace()).collect()
}

impl FromStr for ScoreField {
    type Err = String;

    /// Accepts the column name or the label, ignoring case and whitespace
    /// (`"P/E Ratio Score"`, `"p/e ratio"`, `"marketcap"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_name(s);
        Self::ALL
            .into_iter()
            .find(|field| normalize_name(field.label()) == wanted)
            .ok_or_else(|| format!("Unknown score field: {}", s))
    }
}
