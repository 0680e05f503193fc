//! Compressible neo-hookean elasticity.
//!
//! Ψ(F) = μ/2 (I₁ − 3) − μ ln J + λ/2 (ln J)²
//!
//! with I₁ = tr(FᵀF) and J = det F. The stress and its differential are
//! the standard closed forms:
//!
//! P(F)      = μ (F − F⁻ᵀ) + λ ln J · F⁻ᵀ
//! δP(F; δF) = μ δF + (μ − λ ln J) F⁻ᵀ δFᵀ F⁻ᵀ + λ tr(F⁻¹ δF) F⁻ᵀ

use turgor_math::Mat3;
use turgor_types::Scalar;

use crate::traits::ElasticModel;

/// Neo-hookean constitutive model with Lamé parameters (mu, lambda).
#[derive(Debug, Clone, Copy)]
pub struct NeoHookean {
    /// Shear modulus.
    pub mu: Scalar,
    /// First Lamé parameter.
    pub lambda: Scalar,
}

impl NeoHookean {
    /// Creates a neo-hookean model from Lamé parameters.
    pub fn new(mu: Scalar, lambda: Scalar) -> Self {
        Self { mu, lambda }
    }
}

impl Default for NeoHookean {
    fn default() -> Self {
        Self::new(0.4, 0.4)
    }
}

#[inline]
fn trace(m: &Mat3) -> Scalar {
    m.x_axis.x + m.y_axis.y + m.z_axis.z
}

impl ElasticModel for NeoHookean {
    fn energy_density(&self, f: &Mat3) -> Scalar {
        let i1 = f.x_axis.length_squared() + f.y_axis.length_squared() + f.z_axis.length_squared();
        let log_j = f.determinant().ln();
        0.5 * self.mu * (i1 - 3.0) - self.mu * log_j + 0.5 * self.lambda * log_j * log_j
    }

    fn piola(&self, f: &Mat3) -> Mat3 {
        let f_inv_t = f.inverse().transpose();
        let log_j = f.determinant().ln();
        self.mu * (*f - f_inv_t) + (self.lambda * log_j) * f_inv_t
    }

    fn piola_differential(&self, f: &Mat3, df: &Mat3) -> Mat3 {
        let f_inv = f.inverse();
        let f_inv_t = f_inv.transpose();
        let log_j = f.determinant().ln();

        let a = self.mu * *df;
        let b = (self.mu - self.lambda * log_j) * (f_inv_t * df.transpose() * f_inv_t);
        let c = (self.lambda * trace(&(f_inv * *df))) * f_inv_t;
        a + b + c
    }

    fn name(&self) -> &str {
        "neohookean"
    }
}
