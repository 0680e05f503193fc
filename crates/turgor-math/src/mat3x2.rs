//! 3×2 matrix type for membrane deformation gradients.
//!
//! The membrane film is a 2D manifold embedded in 3D space. Its deformation
//! gradient F is a 3×2 matrix mapping from the 2D reference frame of a
//! surface triangle to the 3D deformed configuration.

use serde::{Deserialize, Serialize};

use crate::{Mat2, Vec3};
use turgor_types::Scalar;

/// A 3×2 column-major matrix.
///
/// Columns are the deformed edge vectors of a surface triangle mapped
/// through the inverse of the rest-state edge matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat3x2 {
    /// First column (3 components).
    pub col0: Vec3,
    /// Second column (3 components).
    pub col1: Vec3,
}

impl Mat3x2 {
    /// Creates a new 3×2 matrix from two column vectors.
    #[inline]
    pub fn from_cols(col0: Vec3, col1: Vec3) -> Self {
        Self { col0, col1 }
    }

    /// The zero matrix.
    pub const ZERO: Self = Self {
        col0: Vec3::ZERO,
        col1: Vec3::ZERO,
    };

    /// Identity-like matrix (first two columns of 3×3 identity).
    pub const IDENTITY: Self = Self {
        col0: Vec3::X,
        col1: Vec3::Y,
    };

    /// Right Cauchy–Green tensor C = FᵀF (2×2 symmetric).
    #[inline]
    pub fn ftf(&self) -> Mat2 {
        transpose_mul(self, self)
    }

    /// Frobenius norm squared: ‖F‖²_F = trace(FᵀF).
    #[inline]
    pub fn frobenius_norm_sq(&self) -> Scalar {
        self.col0.length_squared() + self.col1.length_squared()
    }

    /// Multiply by a 2×2 matrix on the right: `self * m`.
    #[inline]
    pub fn mul_mat2(&self, m: Mat2) -> Self {
        Self {
            col0: self.col0 * m.x_axis.x + self.col1 * m.x_axis.y,
            col1: self.col0 * m.y_axis.x + self.col1 * m.y_axis.y,
        }
    }
}

/// Computes AᵀB for two 3×2 matrices (a 2×2 result).
#[inline]
pub fn transpose_mul(a: &Mat3x2, b: &Mat3x2) -> Mat2 {
    Mat2::from_cols(
        crate::Vec2::new(a.col0.dot(b.col0), a.col1.dot(b.col0)),
        crate::Vec2::new(a.col0.dot(b.col1), a.col1.dot(b.col1)),
    )
}

impl std::ops::Add for Mat3x2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            col0: self.col0 + rhs.col0,
            col1: self.col1 + rhs.col1,
        }
    }
}

impl std::ops::Sub for Mat3x2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            col0: self.col0 - rhs.col0,
            col1: self.col1 - rhs.col1,
        }
    }
}

impl std::ops::Mul<Scalar> for Mat3x2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Scalar) -> Self {
        Self {
            col0: self.col0 * rhs,
            col1: self.col1 * rhs,
        }
    }
}
