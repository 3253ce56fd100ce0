//! Reduction quality metric
//!
//! The Hadamard ratio `(∏ ||b*_i|| / ∏ ||b_i||)^(1/n)` scores a basis in
//! (0, 1]; 1 means perfectly orthogonal. Since the numerator equals |det B|
//! for a square basis and determinants are invariant under the unimodular
//! row operations LLL performs, reduction can only improve the ratio by
//! shortening the denominator.

use crate::basis::Basis;
use crate::gram_schmidt::GramSchmidt;

/// Floor applied to every norm before taking products, guarding the ratio
/// against zero vectors in degenerate intermediate bases.
const NORM_FLOOR: f64 = 1e-10;

/// Hadamard ratio of `basis`, in (0, 1].
pub fn hadamard_ratio(basis: &Basis) -> f64 {
    let gs = GramSchmidt::compute(basis);
    let numerator: f64 = gs.ortho.iter().map(|v| v.norm().max(NORM_FLOOR)).product();
    let denominator: f64 = basis
        .vectors
        .iter()
        .map(|v| v.norm().max(NORM_FLOOR))
        .product();
    (numerator.abs() / denominator).powf(1.0 / basis.n as f64)
}

/// Product of Gram-Schmidt norms, |det B| for a square basis. Used to check
/// that reduction preserves the lattice determinant.
pub fn gso_norm_product(basis: &Basis) -> f64 {
    let gs = GramSchmidt::compute(basis);
    gs.ortho.iter().map(|v| v.norm()).product()
}
