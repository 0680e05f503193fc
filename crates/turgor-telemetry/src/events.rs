//! Solver event types.
//!
//! Lightweight value types emitted by the simulation and optimization
//! drivers. Each event carries a solve index (timestep or outer
//! iteration counter) plus a domain payload.

use serde::{Deserialize, Serialize};

/// An event emitted during a solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverEvent {
    /// Solve number (timestep or optimization run, 0-indexed).
    pub solve: u32,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventKind {
    /// Final convergence report for a solve.
    Convergence {
        /// Newton iterations used.
        newton_iterations: u32,
        /// Total CG iterations.
        cg_iterations: u32,
        /// Final residual norm.
        residual: f64,
        /// Whether the residual reached tolerance.
        converged: bool,
    },

    /// Elastic energy snapshot.
    Energy {
        /// Total elastic strain energy.
        elastic: f64,
    },

    /// One outer optimizer iteration finished.
    OptimizerIteration {
        /// Outer iteration number.
        iteration: u32,
        /// Combined residual norm.
        residual: f64,
    },

    /// A mesh file was written.
    MeshWritten {
        /// Output path.
        path: String,
    },
}

impl SolverEvent {
    /// Creates a new event for the given solve.
    pub fn new(solve: u32, kind: EventKind) -> Self {
        Self { solve, kind }
    }
}
