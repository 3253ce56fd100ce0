//! Lattice Reduction Core Library
//!
//! Basis reduction and closest-vector decoding over real-valued lattices.
//!
//! # Overview
//!
//! This library provides the shared algorithmic core for lattice-based
//! calculators and cryptanalytic tools: Gram-Schmidt orthogonalization,
//! two-vector Gaussian reduction, general LLL reduction, Babai's
//! nearest-plane closest-vector approximation, and lattice embeddings that
//! turn subset-sum feasibility and congruential key recovery into
//! short/close-vector searches.
//!
//! All arithmetic is bounded `f64` with explicit stability epsilons; the
//! iterative loops absorb numerical degeneracy locally instead of failing.
//!
//! # Key Components
//!
//! - [`vector`] - Fixed-dimension real vector
//! - [`basis`] - Ordered lattice basis with input validation
//! - [`gram_schmidt`] - Orthogonalization and the μ coefficient table
//! - [`gauss`] - Two-vector Gaussian reduction with a replayable trace
//! - [`lll`] - LLL reduction with size-reduction and Lovász swap steps
//! - [`babai`] - Closest-vector approximation by successive rounding
//! - [`subset_sum`] - Subset-sum feasibility via a knapsack-style embedding
//! - [`congruential`] - Congruential public-key scheme and its Gauss attack
//! - [`quality`] - Hadamard ratio reduction-quality metric
//! - [`arith`] - Extended Euclid and modular inverse helpers

pub mod arith;
pub mod babai;
pub mod basis;
pub mod congruential;
pub mod error;
pub mod gauss;
pub mod gram_schmidt;
pub mod lll;
pub mod quality;
pub mod subset_sum;
pub mod vector;

pub use arith::{extended_gcd, mod_inverse};
pub use babai::{closest_vector, ClosestVector};
pub use basis::Basis;
pub use congruential::{attack, decrypt, encrypt, AttackOutcome, AttackResult, KeyPair, PrivateKey, PublicKey};
pub use error::{LatticeError, ReductionWarning, Result};
pub use gauss::{reduce_pair, GaussReduction};
pub use gram_schmidt::GramSchmidt;
pub use lll::{Lll, LllConfig, LllStats, ReductionReport, CLASSICAL_DELTA};
pub use quality::hadamard_ratio;
pub use subset_sum::{SubsetSumOutcome, SubsetSumProblem, SubsetSumResult};
pub use vector::Vector;
