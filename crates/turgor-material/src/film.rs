//! Incompressible membrane neo-hookean film.
//!
//! The film is a 2D manifold; its deformation gradient is 3×2. With
//! C = FᵀF (2×2) and the incompressibility closure λ₃² = 1/det C for the
//! thickness stretch, the energy per unit rest area at unit thickness is
//!
//! ψ(F) = μ/2 (tr C + 1/det C − 3)
//!
//! which gives
//!
//! P(F)      = μ (F − (det C)⁻¹ F C⁻¹)
//! δP(F; δF) = μ [δF + (det C)⁻¹ ( tr(C⁻¹ δC) F C⁻¹
//!                                − δF C⁻¹ + F C⁻¹ δC C⁻¹ )]
//!
//! with δC = δFᵀF + FᵀδF.

use turgor_math::mat3x2::{transpose_mul, Mat3x2};
use turgor_types::Scalar;

use crate::traits::FilmModel;

/// Membrane neo-hookean film with shear modulus `mu`.
#[derive(Debug, Clone, Copy)]
pub struct NeoHookeanFilm {
    /// Shear modulus.
    pub mu: Scalar,
}

impl NeoHookeanFilm {
    /// Creates a membrane neo-hookean model.
    pub fn new(mu: Scalar) -> Self {
        Self { mu }
    }
}

impl Default for NeoHookeanFilm {
    fn default() -> Self {
        Self::new(0.4)
    }
}

impl FilmModel for NeoHookeanFilm {
    fn energy_density(&self, f: &Mat3x2) -> Scalar {
        let c = f.ftf();
        let det_c = c.determinant();
        0.5 * self.mu * (f.frobenius_norm_sq() + 1.0 / det_c - 3.0)
    }

    fn piola(&self, f: &Mat3x2) -> Mat3x2 {
        let c = f.ftf();
        let c_inv = c.inverse();
        let det_c = c.determinant();
        (*f - f.mul_mat2(c_inv) * (1.0 / det_c)) * self.mu
    }

    fn piola_differential(&self, f: &Mat3x2, df: &Mat3x2) -> Mat3x2 {
        let c = f.ftf();
        let c_inv = c.inverse();
        let s = 1.0 / c.determinant();

        let dc = transpose_mul(df, f) + transpose_mul(f, df);
        let c_inv_dc = c_inv * dc;
        let tr = c_inv_dc.x_axis.x + c_inv_dc.y_axis.y;

        let inner = f.mul_mat2(c_inv) * tr - df.mul_mat2(c_inv) + f.mul_mat2(c_inv * dc * c_inv);
        (*df + inner * s) * self.mu
    }

    fn name(&self) -> &str {
        "film_neohookean"
    }
}
