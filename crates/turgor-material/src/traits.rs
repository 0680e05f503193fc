//! Material model traits — the core constitutive abstractions.
//!
//! The solver talks to materials exclusively through these traits,
//! enabling runtime swapping of constitutive laws (strategy pattern).
//! All quantities are per local patch: per tetra for elastic models,
//! per surface triangle for films, per hinge stencil for bending, per
//! enclosed cavity for air.

use turgor_math::mat3x2::Mat3x2;
use turgor_math::{Mat3, Vec3};
use turgor_types::Scalar;

/// Volumetric elastic law evaluated on a tetra's deformation gradient.
///
/// Forces are recovered from the first Piola–Kirchhoff stress by the
/// engine's element machinery; the model itself never sees the mesh.
pub trait ElasticModel: Send + Sync {
    /// Strain energy density at deformation gradient `f`.
    fn energy_density(&self, f: &Mat3) -> Scalar;

    /// First Piola–Kirchhoff stress P(F) = ∂Ψ/∂F.
    fn piola(&self, f: &Mat3) -> Mat3;

    /// Exact directional derivative δP(F; δF).
    ///
    /// This is the Jacobian-vector product the matrix-free Newton–Krylov
    /// loop is built on; it must match finite differences of [`piola`]
    /// to first order.
    ///
    /// [`piola`]: ElasticModel::piola
    fn piola_differential(&self, f: &Mat3, df: &Mat3) -> Mat3;

    /// Returns the name of this constitutive model.
    fn name(&self) -> &str;
}

/// Membrane (film) elastic law on a surface triangle's 3×2 deformation
/// gradient. Same contract shape as [`ElasticModel`], one dimension down.
pub trait FilmModel: Send + Sync {
    /// Strain energy per unit rest area (unit thickness).
    fn energy_density(&self, f: &Mat3x2) -> Scalar;

    /// Membrane first Piola–Kirchhoff stress (3×2).
    fn piola(&self, f: &Mat3x2) -> Mat3x2;

    /// Exact directional derivative δP(F; δF).
    fn piola_differential(&self, f: &Mat3x2, df: &Mat3x2) -> Mat3x2;

    fn name(&self) -> &str;
}

/// Cavity pressure as a function of enclosed volume.
pub trait AirModel: Send + Sync {
    /// Pressure at the given cavity volume.
    fn pressure(&self, volume: Scalar) -> Scalar;

    /// dp/dV — couples pressure to volume changes. Zero for isobaric
    /// models, negative for closed-gas models.
    fn pressure_volume_derivative(&self, volume: Scalar) -> Scalar;

    fn name(&self) -> &str;
}

/// Bending law on a hinge stencil of four vertices: the shared edge
/// `(x[0], x[1])` and the two wing vertices `(x[2], x[3])`.
pub trait BendingModel: Send + Sync {
    /// Bending energy of one hinge at positions `x` with rest positions
    /// `rest`.
    fn energy(&self, x: &[Vec3; 4], rest: &[Vec3; 4]) -> Scalar;

    /// Nodal forces on the four stencil vertices.
    fn force(&self, x: &[Vec3; 4], rest: &[Vec3; 4]) -> [Vec3; 4];

    /// Exact directional derivative of [`force`] along `dx`.
    ///
    /// [`force`]: BendingModel::force
    fn force_differential(&self, x: &[Vec3; 4], rest: &[Vec3; 4], dx: &[Vec3; 4]) -> [Vec3; 4];

    fn name(&self) -> &str;
}
