//! Optimizer configuration.

use serde::{Deserialize, Serialize};

use turgor_types::Scalar;

/// Configuration for the inverse-design solve.
///
/// The objective weights control the relative pull of the terms in the
/// combined residual: `alpha` shape matching, `beta` displacement
/// smoothness, `penalty` rigid-group coherence. `gamma` drives the
/// thickness relaxation applied between outer iterations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimConfig {
    /// Maximum outer Gauss–Newton iterations.
    pub max_iterations: u32,

    /// Convergence tolerance on the combined residual norm.
    pub tolerance: Scalar,

    /// Shape-matching weight.
    pub alpha: Scalar,

    /// Displacement smoothness weight.
    pub beta: Scalar,

    /// Thickness smoothing weight.
    pub gamma: Scalar,

    /// Rigid-group coherence penalty.
    pub penalty: Scalar,

    /// Initial film thickness assigned to every tetra.
    pub initial_thickness: Scalar,
}

impl Default for OptimConfig {
    fn default() -> Self {
        Self {
            max_iterations: 30,
            tolerance: 1e-6,
            alpha: 10.0,
            beta: 1.0,
            gamma: 100.0,
            penalty: 10.0,
            initial_thickness: 1.0,
        }
    }
}
