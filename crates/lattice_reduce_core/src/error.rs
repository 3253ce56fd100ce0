//! Error types for the lattice core

use thiserror::Error;

/// Hard input errors. Raised before any computation starts; the iterative
/// reduction loops themselves never return these for numerical reasons.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    #[error("basis is empty")]
    EmptyBasis,

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("square basis required: {rows} vectors of dimension {dim}")]
    NotSquare { rows: usize, dim: usize },

    #[error("non-finite component at vector {row}, index {col}")]
    NonFiniteComponent { row: usize, col: usize },

    #[error("basis is fully degenerate, no reduction step is defined")]
    DegenerateBasis,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, LatticeError>;

/// Warnings attached to an otherwise-valid reduction result.
///
/// Floating-point drift is expected and tolerated: a basis that ran out of
/// iterations or fails the classical post-hoc check is still returned, with
/// the warning riding alongside it.
#[derive(Debug, Clone, PartialEq)]
pub enum ReductionWarning {
    /// The iteration cap was reached before the reduction index covered the
    /// whole basis; the returned basis is a partial result.
    Unconverged { iterations: u64 },
    /// The reduced basis fails the independent δ = 0.75 acceptance check.
    QualityCheckFailed,
}

impl std::fmt::Display for ReductionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReductionWarning::Unconverged { iterations } => {
                write!(f, "iteration cap reached after {} iterations; partial result", iterations)
            }
            ReductionWarning::QualityCheckFailed => {
                write!(f, "result fails the classical δ=0.75 LLL acceptance check")
            }
        }
    }
}
