//! # turgor-optim
//!
//! Inverse shape design on top of the implicit engine.
//!
//! The optimizer searches for vertex positions that are simultaneously
//! near force equilibrium (volumetric elasticity + cavity air + membrane
//! film + bending) and close to a target shape. Unlike the engine's
//! matrix-free physics step, the objective mixes heterogeneous terms that
//! are cheaper to assemble directly, so each outer iteration builds the
//! combined residual and its explicit sparse Jacobian over the free DOFs
//! and solves the correction with a sparse LU factorization.
//!
//! The two strategies are deliberately different: matrix-free CG suits
//! the homogeneous high-tetra-count physics solve; explicit assembly
//! suits the multi-term objective at optimization problem sizes.

pub mod config;
pub mod film;
pub mod laplacian;
pub mod optimizer;
pub mod state;

pub use config::OptimConfig;
pub use film::FilmElement;
pub use optimizer::{OptimReport, Optimizer};
pub use state::OptState;
