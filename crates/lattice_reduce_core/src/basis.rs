//! Lattice basis representation
//!
//! An ordered sequence of vectors; the order carries meaning both as the
//! reduction loop index and, for embeddings, as the correspondence to the
//! original problem's items.
//!
//! Input validation is front-loaded here: every constructor rejects empty,
//! ragged, or non-finite input, so the reduction loops can assume a
//! well-formed basis throughout.

use std::fmt;

use crate::error::{LatticeError, Result};
use crate::vector::Vector;

/// A lattice basis represented as ordered row vectors.
///
/// The lattice L(B) = {Σ x_i b_i : x_i ∈ Z}. Bases are mutated in place
/// during reduction (row swaps, integer row combinations) and discarded
/// once a result has been reported.
#[derive(Debug, Clone, PartialEq)]
pub struct Basis {
    /// Basis vectors as rows.
    pub vectors: Vec<Vector>,
    /// Number of basis vectors.
    pub n: usize,
    /// Dimension of the ambient space.
    pub dim: usize,
}

impl Basis {
    /// Create a basis from row vectors, validating shape and finiteness.
    pub fn new(vectors: Vec<Vector>) -> Result<Self> {
        if vectors.is_empty() {
            return Err(LatticeError::EmptyBasis);
        }
        let dim = vectors[0].dim();
        if dim == 0 {
            return Err(LatticeError::EmptyBasis);
        }
        for (row, v) in vectors.iter().enumerate() {
            if v.dim() != dim {
                return Err(LatticeError::DimensionMismatch {
                    expected: dim,
                    actual: v.dim(),
                });
            }
            for (col, x) in v.components.iter().enumerate() {
                if !x.is_finite() {
                    return Err(LatticeError::NonFiniteComponent { row, col });
                }
            }
        }
        let n = vectors.len();
        Ok(Self { vectors, n, dim })
    }

    /// Create a basis from raw rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        Self::new(rows.iter().map(|r| Vector::new(r.clone())).collect())
    }

    /// Create a random integer-valued basis for testing, entries uniform in
    /// `[-bound, bound]`.
    pub fn random(n: usize, dim: usize, bound: i64) -> Result<Self> {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|_| (0..dim).map(|_| rng.gen_range(-bound..=bound) as f64).collect())
            .collect();
        Self::from_rows(&rows)
    }

    /// Error unless the basis is square (`n == dim`), as LLL and Babai
    /// decoding require.
    pub fn require_square(&self) -> Result<()> {
        if self.n != self.dim {
            return Err(LatticeError::NotSquare {
                rows: self.n,
                dim: self.dim,
            });
        }
        Ok(())
    }

    pub fn get(&self, i: usize) -> &Vector {
        &self.vectors[i]
    }

    /// Swap two basis rows.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.vectors.swap(i, j);
    }

    /// Row combination `b_i -= q * b_j`, the size-reduction step.
    pub fn row_combine(&mut self, i: usize, j: usize, q: f64) {
        debug_assert_ne!(i, j);
        let bj = self.vectors[j].clone();
        self.vectors[i].sub_scaled(&bj, q);
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Basis ({}×{}):", self.n, self.dim)?;
        for (i, v) in self.vectors.iter().enumerate() {
            writeln!(f, "  b_{}: {}", i, v)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basis_creation() {
        let basis = Basis::from_rows(&[vec![1.0, 0.0, 3.0], vec![0.0, 1.0, 5.0]]).unwrap();
        assert_eq!(basis.n, 2);
        assert_eq!(basis.dim, 3);
        assert!(basis.require_square().is_err());
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(Basis::from_rows(&[]), Err(LatticeError::EmptyBasis));
    }

    #[test]
    fn test_ragged_rejected() {
        let err = Basis::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(err, LatticeError::DimensionMismatch { expected: 2, actual: 1 });
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = Basis::from_rows(&[vec![1.0, f64::NAN]]).unwrap_err();
        assert_eq!(err, LatticeError::NonFiniteComponent { row: 0, col: 1 });
    }

    #[test]
    fn test_row_combine() {
        let mut basis = Basis::from_rows(&[vec![7.0, 1.0], vec![1.0, 5.0]]).unwrap();
        basis.row_combine(0, 1, 1.0);
        assert_eq!(basis.get(0).components, vec![6.0, -4.0]);
    }
}
