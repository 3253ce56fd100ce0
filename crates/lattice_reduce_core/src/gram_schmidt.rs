//! Gram-Schmidt orthogonalization
//!
//! Given a basis B = [b_0, ..., b_{n-1}], computes the orthogonal vectors
//! b*_i and projection coefficients μ_ij:
//!
//! ```text
//! b*_0 = b_0
//! b*_i = b_i - Σ_{j<i} μ_ij b*_j
//! μ_ij = <b_i, b*_j> / <b*_j, b*_j>
//! ```
//!
//! Output vectors are not normalized. The computation is pure over a copy of
//! the input; the reduction loops recompute it in full after every basis
//! mutation rather than maintaining it incrementally, trading O(n)
//! recomputations per step for numerical simplicity.

use crate::basis::Basis;
use crate::vector::Vector;

/// A projection denominator `<b*_j, b*_j>` below this is treated as a
/// numerically-zero direction and its term is skipped. The reduction loops
/// pass near-dependent intermediate bases through here repeatedly, so this
/// tolerance is load-bearing, not cosmetic.
pub const DEGENERACY_EPS: f64 = 1e-12;

/// Gram-Schmidt orthogonalization data.
#[derive(Debug, Clone)]
pub struct GramSchmidt {
    /// Orthogonalized vectors b*_i, same cardinality as the input basis.
    pub ortho: Vec<Vector>,
    /// Coefficients μ_ij stored lower-triangular: `mu[i]` has length i.
    pub mu: Vec<Vec<f64>>,
    /// Number of vectors.
    pub n: usize,
}

impl GramSchmidt {
    /// Compute the orthogonalization of `basis`.
    ///
    /// Projection terms with a degenerate denominator are skipped (the
    /// corresponding μ stays 0); nothing here ever fails.
    pub fn compute(basis: &Basis) -> Self {
        let n = basis.n;
        let mut ortho: Vec<Vector> = basis.vectors.clone();
        let mut mu: Vec<Vec<f64>> = (0..n).map(|i| vec![0.0; i]).collect();

        for i in 1..n {
            for j in 0..i {
                let denominator = ortho[j].norm_squared();
                if denominator.abs() < DEGENERACY_EPS {
                    continue;
                }
                let m = basis.get(i).dot(&ortho[j]) / denominator;
                mu[i][j] = m;
                let bj = ortho[j].clone();
                ortho[i].sub_scaled(&bj, m);
            }
        }

        Self { ortho, mu, n }
    }

    /// Squared norm `<b*_i, b*_i>`.
    pub fn norm_squared(&self, i: usize) -> f64 {
        self.ortho[i].norm_squared()
    }

    /// Coefficient μ_ij, defined for j < i.
    pub fn mu(&self, i: usize, j: usize) -> f64 {
        debug_assert!(j < i);
        self.mu[i][j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gram_schmidt_2d() {
        let basis = Basis::from_rows(&[vec![3.0, 1.0], vec![2.0, 2.0]]).unwrap();
        let gs = GramSchmidt::compute(&basis);

        // ||b*_0||^2 = 10, μ_10 = 8/10, ||b*_1||^2 = 8 - (4/5)^2 * 10 = 8/5
        assert!((gs.norm_squared(0) - 10.0).abs() < 1e-12);
        assert!((gs.mu(1, 0) - 0.8).abs() < 1e-12);
        assert!((gs.norm_squared(1) - 1.6).abs() < 1e-12);

        // b*_1 orthogonal to b*_0
        assert!(gs.ortho[0].dot(&gs.ortho[1]).abs() < 1e-12);
    }

    #[test]
    fn test_orthogonal_basis_is_fixed_point() {
        // Recomputing on an already-orthogonal basis must change nothing.
        let basis = Basis::from_rows(&[
            vec![2.0, 0.0, 0.0],
            vec![0.0, 3.0, 0.0],
            vec![0.0, 0.0, 5.0],
        ])
        .unwrap();

        let gs = GramSchmidt::compute(&basis);
        for i in 0..3 {
            for (a, b) in gs.ortho[i].components.iter().zip(basis.get(i).components.iter()) {
                assert!((a - b).abs() < 1e-12);
            }
        }

        // And once more on the orthogonalized output: idempotent up to ε.
        let again = Basis::new(gs.ortho.clone()).unwrap();
        let gs2 = GramSchmidt::compute(&again);
        for i in 0..3 {
            for (a, b) in gs2.ortho[i].components.iter().zip(gs.ortho[i].components.iter()) {
                assert!((a - b).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_degenerate_row_skipped() {
        // Second row is a multiple of the first; b*_1 collapses to ~0 and
        // the i=2 projection onto it must be skipped, not blow up.
        let basis = Basis::from_rows(&[
            vec![1.0, 0.0, 0.0],
            vec![2.0, 0.0, 0.0],
            vec![0.0, 1.0, 1.0],
        ])
        .unwrap();

        let gs = GramSchmidt::compute(&basis);
        assert!(gs.norm_squared(1) < DEGENERACY_EPS);
        assert!(gs.ortho[2].is_finite());
        assert!((gs.norm_squared(2) - 2.0).abs() < 1e-12);
    }
}
