//! Subset-sum feasibility via lattice embedding
//!
//! Given weights w_1..w_n and a target T, builds the (n+1)×(n+1) basis
//!
//! ```text
//! [ 1  0  ...  0  N*w_1 ]
//! [ 0  1  ...  0  N*w_2 ]
//! [ ...                 ]
//! [ 0  0  ...  1  N*w_n ]
//! [ 0  0  ...  0  -N*T  ]
//! ```
//!
//! with N = 2·max(max w_i, T). An exact solution x ∈ {0,1}^n corresponds to
//! the short lattice vector (x_1, ..., x_n, 0); the weighting N makes any
//! non-solution keep a large last coordinate.
//!
//! LLL does not always surface the solution vector as a basis row: a basis
//! of short equal-sum relation vectors (differences of two subsets with the
//! same sum) can be shorter still, in which case the solution is a small
//! integer combination of the zero-tail rows. Extraction therefore scans
//! rows and their negations first, then enumerates {-1, 0, 1} combinations
//! of the rows whose last coordinate is zero.
//!
//! This is a heuristic, not a decision procedure: false negatives on
//! satisfiable instances are possible, and when several subsets hit the
//! target the search simply accepts the first qualifying candidate.

use crate::basis::Basis;
use crate::error::{LatticeError, Result};
use crate::lll::{Lll, LllConfig, ReductionReport};
use crate::vector::Vector;

/// Tolerance for recognizing 0/1 entries in a reduced-basis row.
const EXTRACTION_EPS: f64 = 1e-6;

/// Cap on the rows fed to the combination search; 3^m coefficient vectors
/// are enumerated, so the candidate list must stay small.
const COMBINATION_ROW_LIMIT: usize = 12;

/// A subset-sum instance over non-negative weights.
#[derive(Debug, Clone)]
pub struct SubsetSumProblem {
    pub weights: Vec<f64>,
    pub target: f64,
}

/// Outcome of the embedding search. `NoSolution` is a normal negative
/// result, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum SubsetSumOutcome {
    Solution {
        /// Selection mask over the input weights, in input order.
        mask: Vec<bool>,
        /// The selected weights.
        selected: Vec<f64>,
        /// Their sum; equals the target up to extraction tolerance.
        sum: f64,
    },
    NoSolution,
}

/// Outcome plus the underlying reduction report (Hadamard ratios, swap
/// count, warnings).
#[derive(Debug, Clone)]
pub struct SubsetSumResult {
    pub outcome: SubsetSumOutcome,
    pub report: ReductionReport,
}

impl SubsetSumProblem {
    pub fn new(weights: Vec<f64>, target: f64) -> Result<Self> {
        if weights.is_empty() {
            return Err(LatticeError::InvalidParameter("weight list is empty".into()));
        }
        for (col, w) in weights.iter().enumerate() {
            if !w.is_finite() {
                return Err(LatticeError::NonFiniteComponent { row: 0, col });
            }
            if *w < 0.0 {
                return Err(LatticeError::InvalidParameter(format!(
                    "weights must be non-negative, got {}",
                    w
                )));
            }
        }
        if !target.is_finite() || target < 0.0 {
            return Err(LatticeError::InvalidParameter(format!(
                "target must be a non-negative number, got {}",
                target
            )));
        }
        Ok(Self { weights, target })
    }

    /// The weighting constant N = 2·max(max w_i, T).
    pub fn weighting(&self) -> f64 {
        let max_w = self.weights.iter().cloned().fold(0.0_f64, f64::max);
        2.0 * max_w.max(self.target)
    }

    /// Build the (n+1)×(n+1) embedding basis.
    pub fn embedding_basis(&self) -> Result<Basis> {
        let n = self.weights.len();
        let big_n = self.weighting();

        let mut rows = vec![vec![0.0; n + 1]; n + 1];
        for (i, w) in self.weights.iter().enumerate() {
            rows[i][i] = 1.0;
            rows[i][n] = big_n * w;
        }
        rows[n][n] = -big_n * self.target;
        Basis::from_rows(&rows)
    }

    /// Reduce the embedding and search it for a 0/1 solution.
    pub fn solve(&self, config: &LllConfig) -> Result<SubsetSumResult> {
        let basis = self.embedding_basis()?;
        let report = Lll::reduce_with_report(&basis, config)?;
        let outcome = self.extract(&report.basis);
        Ok(SubsetSumResult { outcome, report })
    }

    /// Search the reduced basis for a solution: each row and its negation
    /// in basis order first, then {-1, 0, 1} integer combinations of the
    /// rows whose last coordinate is zero.
    fn extract(&self, reduced: &Basis) -> SubsetSumOutcome {
        let n = self.weights.len();

        for row in &reduced.vectors {
            if let Some(solution) = self.qualify(&row.components) {
                return solution;
            }
            let negated: Vec<f64> = row.components.iter().map(|x| -x).collect();
            if let Some(solution) = self.qualify(&negated) {
                return solution;
            }
        }

        let mut candidates: Vec<&Vector> = reduced
            .vectors
            .iter()
            .filter(|row| row[n].abs() < EXTRACTION_EPS)
            .collect();
        candidates.truncate(COMBINATION_ROW_LIMIT);
        let m = candidates.len();
        if m < 2 {
            return SubsetSumOutcome::NoSolution;
        }

        // Odometer over {-1, 0, 1}^m; single-row ± cases were covered by
        // the direct scan, but re-testing them is harmless.
        let mut coefficients = vec![-1i64; m];
        loop {
            let mut combined = vec![0.0; n + 1];
            for (c, row) in coefficients.iter().zip(candidates.iter()) {
                if *c != 0 {
                    for (j, x) in combined.iter_mut().enumerate() {
                        *x += (*c as f64) * row[j];
                    }
                }
            }
            if let Some(solution) = self.qualify(&combined) {
                return solution;
            }

            let mut i = 0;
            loop {
                if i == m {
                    return SubsetSumOutcome::NoSolution;
                }
                if coefficients[i] < 1 {
                    coefficients[i] += 1;
                    break;
                }
                coefficients[i] = -1;
                i += 1;
            }
        }
    }

    /// Test one candidate row: leading entries each within ε of 0 or 1,
    /// last entry within ε of 0, a non-empty selection, and the selected
    /// weights summing to the target. The sum check is essential: a zero
    /// last coordinate only means the masked sum is an integer *multiple*
    /// of the target.
    fn qualify(&self, row: &[f64]) -> Option<SubsetSumOutcome> {
        let n = self.weights.len();
        if row[n].abs() >= EXTRACTION_EPS {
            return None;
        }
        let mut mask = Vec::with_capacity(n);
        for &x in &row[..n] {
            if x.abs() < EXTRACTION_EPS {
                mask.push(false);
            } else if (x - 1.0).abs() < EXTRACTION_EPS {
                mask.push(true);
            } else {
                return None;
            }
        }
        if !mask.iter().any(|&b| b) {
            return None;
        }
        let selected: Vec<f64> = self
            .weights
            .iter()
            .zip(mask.iter())
            .filter(|(_, &m)| m)
            .map(|(w, _)| *w)
            .collect();
        let sum: f64 = selected.iter().sum();
        if (sum - self.target).abs() > EXTRACTION_EPS * self.target.max(1.0) {
            return None;
        }
        Some(SubsetSumOutcome::Solution { mask, selected, sum })
    }
}
