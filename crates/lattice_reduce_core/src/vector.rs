//! Fixed-dimension real vector
//!
//! The element type of every basis in this crate. Dimension is fixed at
//! construction; all combining operations require equal dimension, which is
//! validated once at the [`Basis`](crate::basis::Basis) boundary and
//! debug-asserted inside the hot loops.

use std::fmt;
use std::ops::{Index, Sub};

/// Guard against division by a numerically-zero norm product in
/// [`Vector::angle_degrees`].
const ANGLE_EPS: f64 = 1e-9;

/// A real vector of fixed dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    pub components: Vec<f64>,
}

impl Vector {
    pub fn new(components: Vec<f64>) -> Self {
        Self { components }
    }

    pub fn zeros(dim: usize) -> Self {
        Self { components: vec![0.0; dim] }
    }

    pub fn dim(&self) -> usize {
        self.components.len()
    }

    /// Inner product ⟨self, other⟩.
    pub fn dot(&self, other: &Vector) -> f64 {
        debug_assert_eq!(self.dim(), other.dim());
        self.components
            .iter()
            .zip(other.components.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Squared Euclidean norm ⟨self, self⟩.
    pub fn norm_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// In-place update `self -= scalar * other`, the elementary row
    /// operation shared by every reduction step in this crate.
    pub fn sub_scaled(&mut self, other: &Vector, scalar: f64) {
        debug_assert_eq!(self.dim(), other.dim());
        for (a, b) in self.components.iter_mut().zip(other.components.iter()) {
            *a -= scalar * b;
        }
    }

    /// In-place update `self += scalar * other`.
    pub fn add_scaled(&mut self, other: &Vector, scalar: f64) {
        self.sub_scaled(other, -scalar);
    }

    /// Angle with another vector, in degrees.
    ///
    /// Returns 0.0 when either vector is numerically zero; the cosine is
    /// clamped to [-1, 1] before `acos` to absorb floating-point overshoot.
    pub fn angle_degrees(&self, other: &Vector) -> f64 {
        let norm_product = self.norm() * other.norm();
        if norm_product < ANGLE_EPS {
            return 0.0;
        }
        let cos_theta = (self.dot(other) / norm_product).clamp(-1.0, 1.0);
        cos_theta.acos().to_degrees()
    }

    /// True when every component is a finite number.
    pub fn is_finite(&self) -> bool {
        self.components.iter().all(|x| x.is_finite())
    }
}

impl Sub for &Vector {
    type Output = Vector;

    fn sub(self, other: &Vector) -> Vector {
        debug_assert_eq!(self.dim(), other.dim());
        Vector::new(
            self.components
                .iter()
                .zip(other.components.iter())
                .map(|(a, b)| a - b)
                .collect(),
        )
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.components[i]
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.4}", x)?;
        }
        write!(f, "]")
    }
}
