//! Babai's nearest-plane closest-vector approximation
//!
//! Given a square basis and a target point, orthogonalizes the basis and
//! rounds coordinates from the last index down to the first:
//!
//! ```text
//! a_i = round(<t, b*_i> / <b*_i, b*_i>)
//! t_j -= a_i * μ_ij   for all j < i
//! ```
//!
//! returning Σ a_i b_i. For a size-reduced basis the result lies within a
//! provable bound of the true closest vector; it is not in general the
//! exact CVP solution. Targets that are themselves lattice points decode
//! exactly, with distance 0.

use crate::basis::Basis;
use crate::error::{LatticeError, Result};
use crate::gram_schmidt::{GramSchmidt, DEGENERACY_EPS};
use crate::vector::Vector;

/// A decoded lattice point and its Euclidean distance to the target.
#[derive(Debug, Clone)]
pub struct ClosestVector {
    pub vector: Vector,
    pub distance: f64,
    /// Integer coefficients a_i expressing the result in the input basis.
    pub coefficients: Vec<f64>,
}

/// Approximate the lattice vector closest to `target`.
///
/// Requires a square basis whose dimension matches the target. Degenerate
/// Gram-Schmidt directions contribute a zero coefficient rather than
/// failing.
pub fn closest_vector(basis: &Basis, target: &Vector) -> Result<ClosestVector> {
    basis.require_square()?;
    if target.dim() != basis.dim {
        return Err(LatticeError::DimensionMismatch {
            expected: basis.dim,
            actual: target.dim(),
        });
    }
    for (col, x) in target.components.iter().enumerate() {
        if !x.is_finite() {
            return Err(LatticeError::NonFiniteComponent { row: 0, col });
        }
    }

    let n = basis.n;
    let gs = GramSchmidt::compute(basis);
    let mut t = target.clone();
    let mut a = vec![0.0; n];

    for i in (0..n).rev() {
        let denominator = gs.norm_squared(i);
        if denominator.abs() < DEGENERACY_EPS {
            continue;
        }
        a[i] = (t.dot(&gs.ortho[i]) / denominator).round();
        // Peel this component's contribution off the lower coordinates
        // before they are rounded in turn.
        for j in 0..i {
            t.components[j] -= a[i] * gs.mu(i, j);
        }
    }

    let mut vector = Vector::zeros(basis.dim);
    for i in 0..n {
        vector.add_scaled(basis.get(i), a[i]);
    }
    let distance = (&vector - target).norm();

    Ok(ClosestVector { vector, distance, coefficients: a })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_lattice_point_decodes_to_itself() {
        let basis = Basis::from_rows(&[vec![2.0, 0.0], vec![0.0, 2.0]]).unwrap();
        let target = Vector::new(vec![4.0, 2.0]);

        let cv = closest_vector(&basis, &target).unwrap();
        assert_eq!(cv.vector.components, vec![4.0, 2.0]);
        assert_eq!(cv.distance, 0.0);
        assert_eq!(cv.coefficients, vec![2.0, 1.0]);
    }

    #[test]
    fn test_rounds_to_nearest_on_orthogonal_basis() {
        let basis = Basis::from_rows(&[vec![2.0, 0.0], vec![0.0, 2.0]]).unwrap();
        let target = Vector::new(vec![3.2, 0.7]);

        let cv = closest_vector(&basis, &target).unwrap();
        // Nearest multiples of 2 are 4 and 0.
        assert_eq!(cv.vector.components, vec![4.0, 0.0]);
        assert!((cv.distance - ((0.8f64).powi(2) + (0.7f64).powi(2)).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_size_reduced_basis_target_on_lattice() {
        // Size-reduced basis (μ_10 = 0.5); target = b_0 + b_1 = (3, 2)
        // decodes exactly.
        let basis = Basis::from_rows(&[vec![2.0, 0.0], vec![1.0, 2.0]]).unwrap();
        let target = Vector::new(vec![3.0, 2.0]);

        let cv = closest_vector(&basis, &target).unwrap();
        assert_eq!(cv.coefficients, vec![1.0, 1.0]);
        assert!((cv.vector.components[0] - 3.0).abs() < 1e-9);
        assert!((cv.vector.components[1] - 2.0).abs() < 1e-9);
        assert!(cv.distance < 1e-9);
    }

    #[test]
    fn test_result_is_lattice_point_3d() {
        let basis = Basis::from_rows(&[
            vec![1.0, 1.0, 1.0],
            vec![-1.0, 0.0, 2.0],
            vec![3.0, 5.0, 6.0],
        ])
        .unwrap();
        let target = Vector::new(vec![4.3, -1.2, 7.9]);

        let cv = closest_vector(&basis, &target).unwrap();
        // Reconstruct from the reported coefficients: must match exactly.
        let mut expect = Vector::zeros(3);
        for i in 0..3 {
            expect.add_scaled(basis.get(i), cv.coefficients[i]);
        }
        assert_eq!(cv.vector.components, expect.components);
        for c in &cv.coefficients {
            assert_eq!(c.fract(), 0.0);
        }
    }

    #[test]
    fn test_non_square_rejected() {
        let basis = Basis::from_rows(&[vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]]).unwrap();
        let target = Vector::new(vec![1.0, 1.0, 1.0]);
        assert!(matches!(
            closest_vector(&basis, &target),
            Err(LatticeError::NotSquare { .. })
        ));
    }

    #[test]
    fn test_target_dimension_checked() {
        let basis = Basis::from_rows(&[vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        let target = Vector::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(
            closest_vector(&basis, &target).unwrap_err(),
            LatticeError::DimensionMismatch { expected: 2, actual: 3 }
        );
    }
}
