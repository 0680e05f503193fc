//! # turgor-material
//!
//! Material model contracts and default constitutive laws.
//!
//! ## Design
//!
//! Four traits, one per material role: [`ElasticModel`] (volumetric
//! tetra elasticity), [`AirModel`] (cavity pressure), [`FilmModel`]
//! (membrane elasticity on surface triangles), and [`BendingModel`]
//! (hinge stencils across surface edges). Each is a strategy the engine
//! or optimizer owns behind a `Box` and can swap at runtime without any
//! solver changes.
//!
//! Every contract exposes energy, force (stress), and the *exact*
//! directional derivative of the force. The derivative is what makes
//! matrix-free Newton–Krylov possible — the solver never assembles a
//! stiffness matrix from these models unless it chooses to probe them.

pub mod air;
pub mod bending;
pub mod film;
pub mod neohookean;
pub mod traits;

pub use air::IsobaricAir;
pub use bending::MeanCurvatureBending;
pub use film::NeoHookeanFilm;
pub use neohookean::NeoHookean;
pub use traits::{AirModel, BendingModel, ElasticModel, FilmModel};
