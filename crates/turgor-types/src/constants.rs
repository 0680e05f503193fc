//! Physical constants and solver defaults.

/// Default simulation timestep (seconds).
pub const DEFAULT_DT: f64 = 1.0 / 60.0;

/// Default number of Newton iterations per implicit step.
pub const DEFAULT_NEWTON_ITERATIONS: u32 = 20;

/// Default Newton residual tolerance (force-balance norm).
pub const DEFAULT_NEWTON_TOLERANCE: f64 = 1.0e-7;

/// Default conjugate-gradient iteration cap per Newton step.
pub const DEFAULT_CG_ITERATIONS: u32 = 300;

/// Default relative tolerance for the inner CG solve.
pub const DEFAULT_CG_TOLERANCE: f64 = 1.0e-9;

/// Default per-vertex lumped mass (kilograms).
pub const DEFAULT_VERTEX_MASS: f64 = 1.0;

/// Epsilon for floating-point comparisons.
pub const EPSILON: f64 = 1.0e-12;

/// Rest-volume threshold below which a tetrahedron is degenerate.
pub const DEGENERATE_VOLUME_THRESHOLD: f64 = 1.0e-12;
