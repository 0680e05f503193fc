//! # turgor-math
//!
//! Linear algebra primitives for the Turgor solver.
//!
//! Provides:
//! - Re-exports of `glam` f64 types (`Vec3`, `Mat3`, etc.)
//! - Per-vertex vector-field reductions used by the matrix-free CG loop
//! - 3×2 matrix type for membrane deformation gradients
//! - Sparse matrix representation (CSR) and faer-backed direct solvers

pub mod mat3x2;
pub mod solver;
pub mod sparse;
pub mod vfield;

// Re-export glam's double-precision types as the canonical math types.
pub use glam::{DMat2 as Mat2, DMat3 as Mat3, DVec2 as Vec2, DVec3 as Vec3};
