//! Engine configuration.
//!
//! Parameters that control solver behavior: Newton and CG iteration
//! caps, convergence tolerances, lumped vertex mass.

use serde::{Deserialize, Serialize};

use turgor_types::{constants, Scalar};

/// Configuration for the implicit engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum Newton iterations per solve.
    pub newton_max_iterations: u32,

    /// Newton convergence tolerance on the residual force norm.
    pub newton_tolerance: Scalar,

    /// Maximum CG iterations per Newton step.
    pub cg_max_iterations: u32,

    /// Relative CG residual reduction tolerance.
    pub cg_tolerance: Scalar,

    /// Lumped mass per vertex.
    pub vertex_mass: Scalar,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            newton_max_iterations: constants::DEFAULT_NEWTON_ITERATIONS,
            newton_tolerance: constants::DEFAULT_NEWTON_TOLERANCE,
            cg_max_iterations: constants::DEFAULT_CG_ITERATIONS,
            cg_tolerance: constants::DEFAULT_CG_TOLERANCE,
            vertex_mass: constants::DEFAULT_VERTEX_MASS,
        }
    }
}

impl EngineConfig {
    /// Creates a config for debugging (fewer iterations, looser tolerance).
    pub fn debug() -> Self {
        Self {
            newton_max_iterations: 3,
            newton_tolerance: 1e-3,
            cg_max_iterations: 50,
            ..Default::default()
        }
    }

    /// Creates a high-accuracy config (more iterations, tighter tolerance).
    pub fn high_accuracy() -> Self {
        Self {
            newton_max_iterations: 50,
            newton_tolerance: 1e-10,
            cg_max_iterations: 1000,
            cg_tolerance: 1e-12,
            ..Default::default()
        }
    }
}
