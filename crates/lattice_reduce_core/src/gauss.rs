//! Two-vector Gaussian lattice reduction
//!
//! The 2-dimensional special case of basis reduction: repeatedly subtract
//! the rounded projection multiple of the shorter vector from the longer
//! one, swapping whenever the order inverts.
//!
//! ```text
//! loop:
//!   m  = round(<v2, v1> / <v1, v1>)
//!   v2 = v2 - m * v1
//!   if ||v1|| <= ||v2||: done
//!   else: swap(v1, v2)
//! ```
//!
//! Every loop entry is recorded as a `(v1, v2)` snapshot and the final pair
//! is appended after the loop, so the full step sequence can be replayed by
//! visualization consumers. Rounding is round-half-away-from-zero
//! (`f64::round`); the regression test below pins the exact trace this
//! produces.
//!
//! Termination: each swap strictly decreases ||v1||, and a strictly
//! decreasing sequence of floats cannot cycle, so no iteration cap is
//! needed here.

use crate::error::{LatticeError, Result};
use crate::vector::Vector;

/// A numerically-zero vector in the starting pair leaves the projection
/// multiple undefined.
const PAIR_DEGENERACY_EPS: f64 = 1e-12;

/// Result of a two-vector reduction: the final pair, ordered
/// `||v1|| <= ||v2||`, plus the full replayable step trace.
#[derive(Debug, Clone)]
pub struct GaussReduction {
    pub v1: Vector,
    pub v2: Vector,
    /// Ordered `(v1, v2)` snapshots: one per loop entry, plus the final pair.
    pub steps: Vec<(Vector, Vector)>,
}

/// Reduce the pair `(v1, v2)`.
///
/// Postconditions: `||v1|| <= ||v2||` and `|<v2,v1>/<v1,v1>| <= 0.5 + ε`
/// (size-reduced).
pub fn reduce_pair(v1: Vector, v2: Vector) -> Result<GaussReduction> {
    if v1.dim() != v2.dim() {
        return Err(LatticeError::DimensionMismatch {
            expected: v1.dim(),
            actual: v2.dim(),
        });
    }
    for (row, v) in [&v1, &v2].into_iter().enumerate() {
        for (col, x) in v.components.iter().enumerate() {
            if !x.is_finite() {
                return Err(LatticeError::NonFiniteComponent { row, col });
            }
        }
    }

    // The loop divides by <v1, v1>; a zero vector in the input leaves no
    // defined reduction step.
    if v1.norm_squared() < PAIR_DEGENERACY_EPS || v2.norm_squared() < PAIR_DEGENERACY_EPS {
        return Err(LatticeError::DegenerateBasis);
    }

    let (mut v1, mut v2) = (v1, v2);
    let mut steps = Vec::new();
    loop {
        steps.push((v1.clone(), v2.clone()));
        let m = (v2.dot(&v1) / v1.dot(&v1)).round();
        v2.sub_scaled(&v1, m);
        // Linearly dependent input collapses v2 to zero; report the pair
        // with the zero vector first rather than dividing by it next round.
        if v2.norm_squared() < PAIR_DEGENERACY_EPS {
            std::mem::swap(&mut v1, &mut v2);
            break;
        }
        if v1.norm() <= v2.norm() {
            break;
        }
        std::mem::swap(&mut v1, &mut v2);
    }
    steps.push((v1.clone(), v2.clone()));

    Ok(GaussReduction { v1, v2, steps })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_eq(v: &Vector, expected: &[f64]) {
        assert_eq!(v.components, expected, "got {} expected {:?}", v, expected);
    }

    #[test]
    fn test_reference_trace_7_1_and_1_5() {
        // Pinned reference trace: (7,1),(1,5) takes exactly two loop
        // entries (m = 0 both times, one swap) and finishes as (1,5),(7,1).
        let r = reduce_pair(Vector::new(vec![7.0, 1.0]), Vector::new(vec![1.0, 5.0])).unwrap();

        assert_eq!(r.steps.len(), 3);
        assert_vec_eq(&r.steps[0].0, &[7.0, 1.0]);
        assert_vec_eq(&r.steps[0].1, &[1.0, 5.0]);
        assert_vec_eq(&r.steps[1].0, &[1.0, 5.0]);
        assert_vec_eq(&r.steps[1].1, &[7.0, 1.0]);
        assert_vec_eq(&r.steps[2].0, &[1.0, 5.0]);
        assert_vec_eq(&r.steps[2].1, &[7.0, 1.0]);

        assert_vec_eq(&r.v1, &[1.0, 5.0]);
        assert_vec_eq(&r.v2, &[7.0, 1.0]);
    }

    #[test]
    fn test_postconditions_hold() {
        let cases: &[(&[f64], &[f64])] = &[
            (&[66.0, 19.0], &[7.0, 2.0]),
            (&[1.0, 0.0], &[0.0, 1.0]),
            (&[90.0, 123.0], &[56.0, 76.0]),
            (&[5.0, 8.0, 1.0], &[3.0, -2.0, 9.0]),
        ];
        for (a, b) in cases {
            let r = reduce_pair(Vector::new(a.to_vec()), Vector::new(b.to_vec())).unwrap();
            assert!(r.v1.norm() <= r.v2.norm());
            let mu = r.v2.dot(&r.v1) / r.v1.dot(&r.v1);
            assert!(mu.abs() <= 0.5 + 1e-6, "not size-reduced: mu = {}", mu);
        }
    }

    #[test]
    fn test_large_entries_reduce() {
        let r = reduce_pair(
            Vector::new(vec![66586820.0, 65354729.0]),
            Vector::new(vec![6513996.0, 6393464.0]),
        )
        .unwrap();
        assert!(r.v1.norm() <= r.v2.norm());
        assert!(r.v1.norm() < 66586820.0);
        assert!(r.steps.len() >= 2);
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = reduce_pair(Vector::new(vec![1.0, 2.0]), Vector::new(vec![1.0])).unwrap_err();
        assert_eq!(err, LatticeError::DimensionMismatch { expected: 2, actual: 1 });
    }

    #[test]
    fn test_zero_vector_is_degenerate() {
        let err = reduce_pair(Vector::new(vec![0.0, 0.0]), Vector::new(vec![3.0, 4.0])).unwrap_err();
        assert_eq!(err, LatticeError::DegenerateBasis);
    }

    #[test]
    fn test_dependent_pair_collapses_to_zero() {
        // (4,2) is an exact multiple of (2,1); the reduction zeroes it out
        // and reports the zero vector first.
        let r = reduce_pair(Vector::new(vec![2.0, 1.0]), Vector::new(vec![4.0, 2.0])).unwrap();
        assert_vec_eq(&r.v1, &[0.0, 0.0]);
        assert_vec_eq(&r.v2, &[2.0, 1.0]);
    }
}
