//! # turgor-types
//!
//! Shared types, error types, and physical constants for the Turgor
//! tetrahedral elastodynamics solver.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other Turgor crates share.

pub mod constants;
pub mod error;
pub mod scalar;

pub use error::{TurgorError, TurgorResult};
pub use scalar::Scalar;
