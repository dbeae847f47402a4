//! Flat in-memory vector index with exact L2 nearest-neighbor search.
//! Built once per document and immutable afterwards; a new upload builds a
//! fresh index and the old one is dropped.

/// Dense row-major matrix of embedding vectors supporting exact k-NN search
/// by Euclidean distance.
#[derive(Debug)]
pub struct VectorIndex {
    data: Vec<f32>,
    dim: usize,
    rows: usize,
}

impl VectorIndex {
    /// Build an index from a non-empty set of equal-dimension vectors.
    ///
    /// Every vector must have the same length and contain only finite
    /// values; violations build nothing.
    pub fn build(vectors: Vec<Vec<f32>>) -> Result<Self, ValidationError> {
        if vectors.is_empty() {
            return Err(ValidationError::Empty);
        }
        let mut distinct: Vec<usize> = vectors.iter().map(|v| v.len()).collect();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() > 1 {
            return Err(ValidationError::InconsistentDimensions(distinct));
        }
        let dim = vectors[0].len();
        let mut data = Vec::with_capacity(vectors.len() * dim);
        for (row, v) in vectors.iter().enumerate() {
            if v.iter().any(|x| !x.is_finite()) {
                return Err(ValidationError::NonFinite { row });
            }
            data.extend_from_slice(v);
        }
        Ok(Self {
            data,
            dim,
            rows: vectors.len(),
        })
    }

    /// Up to `k` rows nearest to `query` by ascending Euclidean distance.
    /// A `k` beyond the row count returns every row; never more.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<(usize, f32)> {
        let mut scored: Vec<(usize, f32)> = (0..self.rows)
            .map(|row| (row, l2_distance(self.row(row), query)))
            .collect();
        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        scored
    }

    /// Number of indexed vectors.
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Dimension shared by every indexed vector.
    pub fn dim(&self) -> usize {
        self.dim
    }

    fn row(&self, row: usize) -> &[f32] {
        &self.data[row * self.dim..(row + 1) * self.dim]
    }
}

fn l2_distance(a: &[f32], b: &[f32]) -> f32 {
    let n = a.len().min(b.len());
    (0..n)
        .map(|i| {
            let d = a[i] - b[i];
            d * d
        })
        .sum::<f32>()
        .sqrt()
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("cannot build an index from zero vectors")]
    Empty,
    #[error("inconsistent embedding dimensions: {0:?}")]
    InconsistentDimensions(Vec<usize>),
    #[error("vector at row {row} contains a non-finite value")]
    NonFinite { row: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn searching_with_an_indexed_vector_finds_itself() {
        let v = vec![vec![0.1, 0.2, 0.3], vec![0.9, 0.8, 0.7], vec![0.5, 0.5, 0.5]];
        let index = VectorIndex::build(v).unwrap();
        let hits = index.search(&[0.9, 0.8, 0.7], 1);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, 1);
        assert!(hits[0].1.abs() < 1e-6);
    }

    #[test]
    fn results_are_ordered_by_ascending_distance() {
        let index = VectorIndex::build(vec![vec![0.0], vec![1.0], vec![2.0]]).unwrap();
        let hits = index.search(&[1.9], 3);
        let rows: Vec<usize> = hits.iter().map(|(row, _)| *row).collect();
        assert_eq!(rows, vec![2, 1, 0]);
        assert!(hits[0].1 <= hits[1].1 && hits[1].1 <= hits[2].1);
    }

    #[test]
    fn k_beyond_row_count_returns_every_row() {
        let index = VectorIndex::build(vec![vec![0.0], vec![1.0]]).unwrap();
        assert_eq!(index.search(&[0.0], 10).len(), 2);
        assert_eq!(index.search(&[0.0], 1).len(), 1);
    }

    #[test]
    fn mismatched_dimensions_build_nothing() {
        let err = VectorIndex::build(vec![vec![0.0, 1.0], vec![0.0]]).unwrap_err();
        assert_eq!(err, ValidationError::InconsistentDimensions(vec![1, 2]));
    }

    #[test]
    fn empty_input_builds_nothing() {
        assert_eq!(VectorIndex::build(Vec::new()).unwrap_err(), ValidationError::Empty);
    }

    #[test]
    fn non_finite_values_build_nothing() {
        let err = VectorIndex::build(vec![vec![0.0, 1.0], vec![f32::NAN, 0.0]]).unwrap_err();
        assert_eq!(err, ValidationError::NonFinite { row: 1 });
    }

    #[test]
    fn len_and_dim_reflect_the_build_input() {
        let index = VectorIndex::build(vec![vec![0.0, 0.0]; 5]).unwrap();
        assert_eq!(index.len(), 5);
        assert_eq!(index.dim(), 2);
        assert!(!index.is_empty());
    }
}
