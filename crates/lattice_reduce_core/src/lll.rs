//! LLL lattice basis reduction
//!
//! Given a square basis B = [b_0, ..., b_{n-1}], produces a δ-reduced basis
//! satisfying:
//!
//! 1. **Size reduction**: |μ_ij| ≤ 1/2 for all j < i
//! 2. **Lovász condition**: ||b*_k||² ≥ (δ − μ²_{k,k-1}) ||b*_{k-1}||²
//!
//! The working δ defaults to 0.99, a tighter quality target than the
//! classical 0.75 guarantee used by the post-hoc [`Lll::is_reduced`] check;
//! the two are deliberately different.
//!
//! The full Gram-Schmidt data is recomputed after every single row mutation.
//! That costs O(n) recomputations per step but keeps the float behavior
//! simple and predictable on near-degenerate intermediate bases; an
//! incremental update would only be acceptable after proving equivalence on
//! the stability-epsilon boundary cases.
//!
//! Termination under floating point is guaranteed by a hard iteration cap
//! (10^n by default). Hitting the cap degrades the result to a partial one
//! with an [`ReductionWarning::Unconverged`] warning; it never hangs and
//! never discards the work done so far.

use crate::basis::Basis;
use crate::error::{LatticeError, ReductionWarning, Result};
use crate::gram_schmidt::GramSchmidt;
use crate::quality::hadamard_ratio;

/// Classical worst-case acceptance threshold for [`Lll::is_reduced`].
pub const CLASSICAL_DELTA: f64 = 0.75;

/// A Gram-Schmidt denominator below this is a numerically-zero direction;
/// the loop skips the affected check and moves on.
const LOOP_DEGENERACY_EPS: f64 = 1e-10;

/// LLL configuration parameters.
#[derive(Debug, Clone)]
pub struct LllConfig {
    /// Lovász parameter δ, must be in (0, 1). Default 0.99.
    pub delta: f64,
    /// Tolerance added to the |μ| > 1/2 size-reduction trigger.
    pub size_reduction_tolerance: f64,
    /// Slack subtracted from the Lovász right-hand side.
    pub lovasz_tolerance: f64,
    /// Hard iteration cap; 0 means the 10^n default.
    pub max_iterations: u64,
    /// Record a basis snapshot at every iteration for step-through replay.
    pub record_trace: bool,
}

impl Default for LllConfig {
    fn default() -> Self {
        Self {
            delta: 0.99,
            size_reduction_tolerance: 1e-6,
            lovasz_tolerance: 1e-6,
            max_iterations: 0,
            record_trace: false,
        }
    }
}

impl LllConfig {
    fn effective_cap(&self, n: usize) -> u64 {
        if self.max_iterations > 0 {
            self.max_iterations
        } else {
            10u64.saturating_pow(n as u32)
        }
    }

    fn validate(&self) -> Result<()> {
        if !(self.delta > 0.0 && self.delta < 1.0) {
            return Err(LatticeError::InvalidParameter(format!(
                "Lovász δ must be in (0, 1), got {}",
                self.delta
            )));
        }
        Ok(())
    }
}

/// Statistics from an LLL run.
#[derive(Debug, Clone, Default)]
pub struct LllStats {
    pub iterations: u64,
    pub swaps: u64,
    pub size_reductions: u64,
    /// False when the iteration cap fired before k reached n.
    pub converged: bool,
}

/// Reduced basis plus everything a reporting consumer needs: swap count,
/// Hadamard ratio before and after, warnings, and an optional snapshot
/// trace for step-through visualization.
#[derive(Debug, Clone)]
pub struct ReductionReport {
    pub basis: Basis,
    pub stats: LllStats,
    pub hadamard_before: f64,
    pub hadamard_after: f64,
    pub warnings: Vec<ReductionWarning>,
    /// One basis snapshot per iteration when requested, empty otherwise.
    pub trace: Vec<Basis>,
}

/// LLL lattice reduction.
pub struct Lll;

impl Lll {
    /// Reduce `basis` under `config`, returning the reduced basis and stats.
    ///
    /// Requires a square basis. The input is never mutated; the algorithm
    /// works on its own copy.
    pub fn reduce(basis: &Basis, config: &LllConfig) -> Result<(Basis, LllStats)> {
        let mut trace = Vec::new();
        Self::reduce_inner(basis, config, &mut trace)
    }

    /// Reduce and wrap the result in a full [`ReductionReport`].
    pub fn reduce_with_report(basis: &Basis, config: &LllConfig) -> Result<ReductionReport> {
        let hadamard_before = hadamard_ratio(basis);
        let mut trace = Vec::new();
        let (reduced, stats) = Self::reduce_inner(basis, config, &mut trace)?;

        let mut warnings = Vec::new();
        if !stats.converged {
            warnings.push(ReductionWarning::Unconverged { iterations: stats.iterations });
        }
        // Float drift can leave a converged run short of the classical
        // guarantee; that is a warning alongside the result, not an error.
        if !Self::is_reduced(&reduced, CLASSICAL_DELTA) {
            warnings.push(ReductionWarning::QualityCheckFailed);
        }

        let hadamard_after = hadamard_ratio(&reduced);
        Ok(ReductionReport {
            basis: reduced,
            stats,
            hadamard_before,
            hadamard_after,
            warnings,
            trace,
        })
    }

    fn reduce_inner(
        basis: &Basis,
        config: &LllConfig,
        trace: &mut Vec<Basis>,
    ) -> Result<(Basis, LllStats)> {
        config.validate()?;
        basis.require_square()?;

        let mut b = basis.clone();
        let n = b.n;
        let mut stats = LllStats { converged: true, ..Default::default() };

        if n <= 1 {
            return Ok((b, stats));
        }

        let max_iterations = config.effective_cap(n);
        let mut gs = GramSchmidt::compute(&b);
        let mut k = 1usize;

        while k < n && stats.iterations < max_iterations {
            stats.iterations += 1;
            if config.record_trace {
                trace.push(b.clone());
            }

            // Size reduction: walk j from k-1 down to 0, recomputing the
            // orthogonalization after every row update.
            for j in (0..k).rev() {
                let denominator = gs.norm_squared(j);
                if denominator.abs() < LOOP_DEGENERACY_EPS {
                    continue;
                }
                let mu = b.get(k).dot(&gs.ortho[j]) / denominator;
                if mu.abs() > 0.5 + config.size_reduction_tolerance {
                    b.row_combine(k, j, mu.round());
                    gs = GramSchmidt::compute(&b);
                    stats.size_reductions += 1;
                }
            }

            // Lovász condition at k. A degenerate b*_{k-1} has nothing to
            // compare against; advance instead of failing.
            let denominator = gs.norm_squared(k - 1);
            if denominator < LOOP_DEGENERACY_EPS {
                k += 1;
                continue;
            }

            let mu = b.get(k).dot(&gs.ortho[k - 1]) / denominator;
            let lhs = gs.norm_squared(k);
            let rhs = (config.delta - mu * mu) * denominator;

            if lhs >= rhs - config.lovasz_tolerance {
                k += 1;
            } else {
                b.swap(k, k - 1);
                stats.swaps += 1;
                gs = GramSchmidt::compute(&b);
                k = if k > 1 { k - 1 } else { 1 };
            }
        }

        if k < n {
            stats.converged = false;
        }

        Ok((b, stats))
    }

    /// Post-hoc validator: independently re-checks the strict size-reduction
    /// bound (|μ| ≤ 0.5, no tolerance) and the Lovász condition at `delta`,
    /// conventionally the classical [`CLASSICAL_DELTA`]. Degenerate
    /// directions are skipped, matching the reduction loop.
    pub fn is_reduced(basis: &Basis, delta: f64) -> bool {
        if basis.n != basis.dim || basis.n <= 1 {
            return basis.n <= 1;
        }
        let gs = GramSchmidt::compute(basis);

        for k in 1..basis.n {
            for j in 0..k {
                let denominator = gs.norm_squared(j);
                if denominator < LOOP_DEGENERACY_EPS {
                    continue;
                }
                let mu = basis.get(k).dot(&gs.ortho[j]) / denominator;
                if mu.abs() > 0.5 {
                    return false;
                }
            }

            let denominator = gs.norm_squared(k - 1);
            if denominator < LOOP_DEGENERACY_EPS {
                continue;
            }
            let mu = basis.get(k).dot(&gs.ortho[k - 1]) / denominator;
            let lhs = gs.norm_squared(k);
            let rhs = (delta - mu * mu) * denominator;
            if lhs < rhs - 1e-6 {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::gso_norm_product;

    #[test]
    fn test_identity_needs_no_work() {
        let basis = Basis::from_rows(&[
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ])
        .unwrap();

        let (reduced, stats) = Lll::reduce(&basis, &LllConfig::default()).unwrap();
        assert_eq!(stats.swaps, 0);
        assert!(stats.converged);
        assert!(Lll::is_reduced(&reduced, CLASSICAL_DELTA));
    }

    #[test]
    fn test_skewed_2d_basis() {
        // Classic example: reduces to short near-orthogonal vectors.
        let basis = Basis::from_rows(&[vec![1.0, 1.0], vec![0.0, 1.0]]).unwrap();
        let (reduced, stats) = Lll::reduce(&basis, &LllConfig::default()).unwrap();

        assert!(stats.converged);
        assert!(Lll::is_reduced(&reduced, CLASSICAL_DELTA));
    }

    #[test]
    fn test_3d_integer_basis() {
        let basis = Basis::from_rows(&[
            vec![1.0, 1.0, 1.0],
            vec![-1.0, 0.0, 2.0],
            vec![3.0, 5.0, 6.0],
        ])
        .unwrap();

        let report = Lll::reduce_with_report(&basis, &LllConfig::default()).unwrap();
        assert!(report.stats.converged);
        assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);
        assert!(Lll::is_reduced(&report.basis, CLASSICAL_DELTA));
        assert!(
            report.hadamard_after >= report.hadamard_before - 1e-9,
            "reduction should not worsen orthogonality: {} -> {}",
            report.hadamard_before,
            report.hadamard_after
        );
    }

    #[test]
    fn test_determinant_preserved() {
        // Row swaps and integer row combinations are unimodular, so the
        // product of GSO norms (= |det B|) must survive reduction.
        let basis = Basis::from_rows(&[
            vec![19.0, 2.0, 32.0],
            vec![46.0, 15.0, 27.0],
            vec![1.0, -9.0, 11.0],
        ])
        .unwrap();

        let before = gso_norm_product(&basis);
        let (reduced, _) = Lll::reduce(&basis, &LllConfig::default()).unwrap();
        let after = gso_norm_product(&reduced);
        assert!(
            (before - after).abs() / before < 1e-6,
            "determinant drifted: {} -> {}",
            before,
            after
        );
    }

    #[test]
    fn test_random_bases_pass_acceptance() {
        for _ in 0..5 {
            let basis = Basis::random(4, 4, 20).unwrap();
            let report = Lll::reduce_with_report(&basis, &LllConfig::default()).unwrap();
            if report.warnings.is_empty() {
                assert!(Lll::is_reduced(&report.basis, CLASSICAL_DELTA));
            }
        }
    }

    #[test]
    fn test_iteration_cap_degrades_gracefully() {
        let basis = Basis::from_rows(&[
            vec![1.0, 1.0, 1.0],
            vec![-1.0, 0.0, 2.0],
            vec![3.0, 5.0, 6.0],
        ])
        .unwrap();

        let config = LllConfig { max_iterations: 1, ..Default::default() };
        let report = Lll::reduce_with_report(&basis, &config).unwrap();
        assert!(!report.stats.converged);
        assert!(report
            .warnings
            .iter()
            .any(|w| matches!(w, ReductionWarning::Unconverged { .. })));
    }

    #[test]
    fn test_non_square_rejected() {
        let basis = Basis::from_rows(&[vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]]).unwrap();
        let err = Lll::reduce(&basis, &LllConfig::default()).unwrap_err();
        assert_eq!(err, LatticeError::NotSquare { rows: 2, dim: 3 });
    }

    #[test]
    fn test_bad_delta_rejected() {
        let basis = Basis::from_rows(&[vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        let config = LllConfig { delta: 1.5, ..Default::default() };
        assert!(matches!(
            Lll::reduce(&basis, &config),
            Err(LatticeError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_trace_records_iterations() {
        let basis = Basis::from_rows(&[vec![1.0, 1.0], vec![0.0, 1.0]]).unwrap();
        let config = LllConfig { record_trace: true, ..Default::default() };
        let report = Lll::reduce_with_report(&basis, &config).unwrap();
        assert_eq!(report.trace.len() as u64, report.stats.iterations);
    }

    #[test]
    fn test_degenerate_row_advances() {
        // Dependent rows must not hang or error; the degenerate direction
        // is skipped and the loop still terminates.
        let basis = Basis::from_rows(&[
            vec![1.0, 0.0, 0.0],
            vec![2.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ])
        .unwrap();

        let (reduced, stats) = Lll::reduce(&basis, &LllConfig::default()).unwrap();
        assert!(stats.converged);
        assert_eq!(reduced.n, 3);
    }
}
