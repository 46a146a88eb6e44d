//! Score vectors.
//!
//! Both engines see a record as a point in score space, one coordinate per
//! selected field. A missing score takes the fallback coordinate so that every
//! vector has the same dimension.

use ndarray::{Array1, Array2, ArrayView1};
use peerscope_data::{Record, ScoreField};

/// Score vector of one record over `fields`, in `fields` order.
pub fn score_vector(record: &Record, fields: &[ScoreField], fallback: f64) -> Array1<f64> {
    fields
        .iter()
        .map(|&field| record.score_or(field, fallback))
        .collect()
}

/// Score matrix with one row per record and one column per field.
pub fn score_matrix<'a, I>(records: I, fields: &[ScoreField], fallback: f64) -> Array2<f64>
where
    I: IntoIterator<Item = &'a Record>,
{
    let rows: Vec<&Record> = records.into_iter().collect();
    Array2::from_shape_fn((rows.len(), fields.len()), |(i, j)| {
        rows[i].score_or(fields[j], fallback)
    })
}

/// Euclidean (L2) distance between two vectors of equal length.
pub fn euclidean_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use peerscope_data::SCORE_FALLBACK;

    #[test]
    fn test_score_vector_uses_fallback() {
        let record = Record::new("X")
            .with_score(ScoreField::MarketCap, Some(80.0))
            .with_score(ScoreField::Roe, None);
        let vector = score_vector(
            &record,
            &[ScoreField::MarketCap, ScoreField::Roe],
            SCORE_FALLBACK,
        );
        assert_eq!(vector.to_vec(), vec![80.0, 50.0]);
    }

    #[test]
    fn test_score_matrix_shape() {
        let records = vec![
            Record::new("A").with_score(ScoreField::Eps, Some(10.0)),
            Record::new("B").with_score(ScoreField::Eps, Some(20.0)),
            Record::new("C"),
        ];
        let matrix = score_matrix(&records, &[ScoreField::Eps, ScoreField::Weight], 50.0);
        assert_eq!(matrix.dim(), (3, 2));
        assert_eq!(matrix[[1, 0]], 20.0);
        assert_eq!(matrix[[2, 0]], 50.0);
        assert_eq!(matrix[[0, 1]], 50.0);
    }

    #[test]
    fn test_euclidean_distance() {
        let a = Array1::from_vec(vec![80.0, 60.0]);
        let b = Array1::from_vec(vec![90.0, 60.0]);
        let c = Array1::from_vec(vec![83.0, 64.0]);
        assert_relative_eq!(euclidean_distance(a.view(), a.view()), 0.0);
        assert_relative_eq!(euclidean_distance(a.view(), b.view()), 10.0);
        assert_relative_eq!(euclidean_distance(a.view(), c.view()), 5.0);
        assert_relative_eq!(
            euclidean_distance(b.view(), c.view()),
            euclidean_distance(c.view(), b.view())
        );
    }
}
