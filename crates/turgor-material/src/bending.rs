//! Hinge bending models.
//!
//! A hinge stencil is four vertices: the shared edge (v0, v1) and the
//! opposite (wing) vertices of the two incident triangles (wa, wb).

use turgor_math::Vec3;
use turgor_types::Scalar;

use crate::traits::BendingModel;

/// Stencil coefficients for the linearized mean-curvature operator:
/// e(x) = (x_wa + x_wb) − (x_v0 + x_v1).
const STENCIL: [Scalar; 4] = [-1.0, -1.0, 1.0, 1.0];

/// Linearized mean-curvature bending.
///
/// Penalizes the deviation of the discrete curvature vector
/// e(x) = Σᵢ cᵢ xᵢ from its rest value:
///
/// E = k/2 |e(x) − e(rest)|²
///
/// The force on vertex i is −k cᵢ (e(x) − e(rest)), and because e is
/// linear in positions the force differential is constant in x.
#[derive(Debug, Clone, Copy)]
pub struct MeanCurvatureBending {
    /// Bending stiffness.
    pub stiffness: Scalar,
}

impl MeanCurvatureBending {
    /// Creates a mean-curvature bending model with stiffness `k`.
    pub fn new(stiffness: Scalar) -> Self {
        Self { stiffness }
    }

    fn curvature(x: &[Vec3; 4]) -> Vec3 {
        (x[2] + x[3]) - (x[0] + x[1])
    }
}

impl Default for MeanCurvatureBending {
    fn default() -> Self {
        Self::new(0.01)
    }
}

impl BendingModel for MeanCurvatureBending {
    fn energy(&self, x: &[Vec3; 4], rest: &[Vec3; 4]) -> Scalar {
        let d = Self::curvature(x) - Self::curvature(rest);
        0.5 * self.stiffness * d.length_squared()
    }

    fn force(&self, x: &[Vec3; 4], rest: &[Vec3; 4]) -> [Vec3; 4] {
        let d = Self::curvature(x) - Self::curvature(rest);
        let mut out = [Vec3::ZERO; 4];
        for (f, c) in out.iter_mut().zip(STENCIL) {
            *f = -self.stiffness * c * d;
        }
        out
    }

    fn force_differential(&self, _x: &[Vec3; 4], _rest: &[Vec3; 4], dx: &[Vec3; 4]) -> [Vec3; 4] {
        let de = Self::curvature(dx);
        let mut out = [Vec3::ZERO; 4];
        for (f, c) in out.iter_mut().zip(STENCIL) {
            *f = -self.stiffness * c * de;
        }
        out
    }

    fn name(&self) -> &str {
        "bending_mean_curvature"
    }
}
