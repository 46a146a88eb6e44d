//! Similarity engine.
//!
//! Finds the companies closest to a target in score space. Distance is the
//! Euclidean norm over the selected score fields, with missing scores replaced
//! by the fallback so that every company stays comparable.

use crate::vector::{euclidean_distance, score_matrix, score_vector};
use crate::{Result, check_arguments};
use peerscope_data::{Record, SCORE_FALLBACK, ScoreField};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A peer and its distance from the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'a> {
    /// The peer record.
    pub peer: &'a Record,
    /// Euclidean distance from the target (lower is more similar).
    pub distance: f64,
}

/// Configuration for the similarity engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Number of neighbours to return (default: 5)
    pub count: usize,
    /// Score used for missing values (default: 50)
    pub fallback: f64,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            count: 5,
            fallback: SCORE_FALLBACK,
        }
    }
}

/// Nearest-neighbour search over score vectors.
#[derive(Debug, Clone, Default)]
pub struct SimilarityEngine {
    config: SimilarityConfig,
}

impl SimilarityEngine {
    /// Create a new similarity engine.
    pub const fn new(config: SimilarityConfig) -> Self {
        Self { config }
    }

    /// Engine configuration.
    pub const fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    /// The `config.count` nearest peers of `target` within `pool`.
    ///
    /// # Errors
    ///
    /// [`EngineError::EmptyFields`](crate::EngineError::EmptyFields) when
    /// `fields` is empty, [`EngineError::InvalidLimit`](crate::EngineError::InvalidLimit)
    /// when the configured count is zero.
    pub fn find<'a>(
        &self,
        target: &Record,
        pool: &'a [Record],
        fields: &[ScoreField],
    ) -> Result<Vec<Neighbor<'a>>> {
        nearest_with_fallback(target, pool, fields, self.config.count, self.config.fallback)
    }
}

/// The `k` records of `pool` closest to `target` over `fields`.
///
/// The target is excluded by symbol. Results are ordered by ascending distance,
/// then ascending symbol. The result holds `min(k, candidates)` entries.
///
/// # Errors
///
/// [`EngineError::EmptyFields`](crate::EngineError::EmptyFields) when `fields`
/// is empty and [`EngineError::InvalidLimit`](crate::EngineError::InvalidLimit)
/// when `k` is zero.
pub fn nearest<'a>(
    target: &Record,
    pool: &'a [Record],
    fields: &[ScoreField],
    k: usize,
) -> Result<Vec<Neighbor<'a>>> {
    nearest_with_fallback(target, pool, fields, k, SCORE_FALLBACK)
}

fn nearest_with_fallback<'a>(
    target: &Record,
    pool: &'a [Record],
    fields: &[ScoreField],
    k: usize,
    fallback: f64,
) -> Result<Vec<Neighbor<'a>>> {
    check_arguments(fields.len(), k)?;

    let target_vector = score_vector(target, fields, fallback);
    let candidates: Vec<&Record> = pool
        .iter()
        .filter(|candidate| candidate.symbol != target.symbol)
        .collect();
    let matrix = score_matrix(candidates.iter().copied(), fields, fallback);

    let mut neighbors: Vec<Neighbor<'a>> = candidates
        .into_iter()
        .zip(matrix.rows())
        .map(|(peer, row)| Neighbor {
            peer,
            distance: euclidean_distance(target_vector.view(), row),
        })
        .collect();

    neighbors.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then_with(|| a.peer.symbol.cmp(&b.peer.symbol))
    });
    neighbors.truncate(k);

    debug!(
        target = %target.symbol,
        fields = fields.len(),
        returned = neighbors.len(),
        "computed nearest neighbours"
    );

    Ok(neighbors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineError;
    use approx::assert_relative_eq;

    const FIELDS: [ScoreField; 2] = [ScoreField::MarketCap, ScoreField::Eps];

    fn company(symbol: &str, market_cap: Option<f64>, eps: Option<f64>) -> Record {
        Record::new(symbol)
            .with_score(ScoreField::MarketCap, market_cap)
            .with_score(ScoreField::Eps, eps)
    }

    #[test]
    fn test_distance_correctness() {
        let target = company("T", Some(80.0), Some(60.0));
        let pool = vec![
            company("B", Some(90.0), Some(60.0)),
            company("A", Some(80.0), Some(60.0)),
            target.clone(),
        ];

        let result = nearest(&target, &pool, &FIELDS, 5).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].peer.symbol, "A");
        assert_relative_eq!(result[0].distance, 0.0);
        assert_eq!(result[1].peer.symbol, "B");
        assert_relative_eq!(result[1].distance, 10.0);
    }

    #[test]
    fn test_target_excluded_by_symbol() {
        let target = company("SELF", Some(10.0), Some(10.0));
        // A different object with the same symbol must still be excluded.
        let twin = company("SELF", Some(99.0), Some(99.0));
        let pool = vec![twin, company("OTHER", Some(12.0), Some(10.0))];

        let result = nearest(&target, &pool, &FIELDS, 10).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result.iter().all(|n| n.peer.symbol != "SELF"));
    }

    #[test]
    fn test_fallback_substitution() {
        let target = company("T", Some(80.0), Some(50.0));
        let missing = company("MISSING", Some(80.0), None);
        let pool = vec![missing];

        let result = nearest(&target, &pool, &FIELDS, 1).unwrap();
        assert_relative_eq!(result[0].distance, 0.0);

        let target = company("T", Some(80.0), Some(20.0));
        let result = nearest(&target, &pool, &FIELDS, 1).unwrap();
        assert_relative_eq!(result[0].distance, 30.0);
    }

    #[test]
    fn test_equal_distance_tie_break_by_symbol() {
        let target = company("T", Some(50.0), Some(50.0));
        let pool = vec![
            company("ZETA", Some(60.0), Some(50.0)),
            company("ALPHA", Some(40.0), Some(50.0)),
            company("MID", Some(50.0), Some(60.0)),
        ];

        let result = nearest(&target, &pool, &FIELDS, 3).unwrap();
        let symbols: Vec<&str> = result.iter().map(|n| n.peer.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["ALPHA", "MID", "ZETA"]);
    }

    #[test]
    fn test_k_truncates() {
        let target = company("T", Some(0.0), Some(0.0));
        let pool: Vec<Record> = (1..=10)
            .map(|i| company(&format!("S{:02}", i), Some(i as f64), Some(0.0)))
            .collect();

        let result = nearest(&target, &pool, &FIELDS, 3).unwrap();
        let symbols: Vec<&str> = result.iter().map(|n| n.peer.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["S01", "S02", "S03"]);
    }

    #[test]
    fn test_empty_fields_rejected() {
        let target = company("T", None, None);
        let pool = vec![company("A", None, None)];
        assert_eq!(
            nearest(&target, &pool, &[], 5).unwrap_err(),
            EngineError::EmptyFields
        );
    }

    #[test]
    fn test_zero_k_rejected() {
        let target = company("T", None, None);
        assert_eq!(
            nearest(&target, &[], &FIELDS, 0).unwrap_err(),
            EngineError::InvalidLimit(0)
        );
    }

    #[test]
    fn test_engine_uses_configured_count_and_fallback() {
        let engine = SimilarityEngine::new(SimilarityConfig {
            count: 1,
            fallback: 0.0,
        });
        let target = company("T", Some(0.0), Some(0.0));
        let pool = vec![company("NONE", None, None), company("FAR", Some(3.0), Some(4.0))];

        let result = engine.find(&target, &pool, &FIELDS).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].peer.symbol, "NONE");
        assert_relative_eq!(result[0].distance, 0.0);
    }
}
