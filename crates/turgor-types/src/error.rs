//! Error types for the Turgor solver.
//!
//! All crates return `TurgorResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the Turgor solver.
#[derive(Debug, Error)]
pub enum TurgorError {
    /// A line in a mesh file could not be parsed.
    #[error("Mesh format error at line {line}: {message}")]
    MeshFormat { line: usize, message: String },

    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// A tetrahedron has zero or negative rest volume.
    #[error("Degenerate tetrahedron {index} (rest volume {volume:.3e})")]
    DegenerateTetra { index: usize, volume: f64 },

    /// Newton or CG iteration cap exhausted without reaching tolerance.
    #[error("Solver did not converge after {iterations} iterations (residual: {residual:.3e})")]
    NonConvergence { iterations: u32, residual: f64 },

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for `Result<T, TurgorError>`.
pub type TurgorResult<T> = Result<T, TurgorError>;
