//! Active metric selection.
//!
//! The set of score fields feeding similarity and ranking. It always holds at
//! least [`MIN_ACTIVE_METRICS`] fields.

use peerscope_data::ScoreField;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Smallest number of fields a selection may hold.
pub const MIN_ACTIVE_METRICS: usize = 1;

/// A non-empty subset of the score fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ScoreField>", into = "Vec<ScoreField>")]
pub struct MetricSelection {
    active: BTreeSet<ScoreField>,
}

impl Default for MetricSelection {
    fn default() -> Self {
        Self {
            active: ScoreField::ALL.into_iter().collect(),
        }
    }
}

impl MetricSelection {
    /// Build a selection from `fields`. An empty list selects every field.
    pub fn with_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = ScoreField>,
    {
        let active: BTreeSet<ScoreField> = fields.into_iter().collect();
        if active.len() < MIN_ACTIVE_METRICS {
            return Self::default();
        }
        Self { active }
    }

    /// Turn `field` on or off.
    ///
    /// Adding always succeeds. Removing fails, leaving the selection
    /// unchanged, when it would drop below [`MIN_ACTIVE_METRICS`]. Returns
    /// whether the request was accepted.
    pub fn toggle(&mut self, field: ScoreField, on: bool) -> bool {
        if on {
            self.active.insert(field);
            return true;
        }
        if !self.active.contains(&field) {
            return true;
        }
        if self.active.len() <= MIN_ACTIVE_METRICS {
            return false;
        }
        self.active.remove(&field);
        true
    }

    /// Active fields in canonical order, regardless of toggle order.
    pub fn active_fields(&self) -> Vec<ScoreField> {
        self.active.iter().copied().collect()
    }

    /// Whether `field` is active.
    pub fn contains(&self, field: ScoreField) -> bool {
        self.active.contains(&field)
    }

    /// Number of active fields.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether no field is active. Never true for a constructed selection.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl From<Vec<ScoreField>> for MetricSelection {
    fn from(fields: Vec<ScoreField>) -> Self {
        Self::with_fields(fields)
    }
}

impl From<MetricSelection> for Vec<ScoreField> {
    fn from(selection: MetricSelection) -> Self {
        selection.active_fields()
    }
}
