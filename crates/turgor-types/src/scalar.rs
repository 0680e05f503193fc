//! Scalar type alias for the solver.
//!
//! The mesh format stores double-precision coordinates and the static
//! force-balance tolerance (1e-5) leaves little headroom in f32, so the
//! whole solver runs in f64.

/// The floating-point type used throughout the solver.
pub type Scalar = f64;
