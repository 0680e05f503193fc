//! # turgor-engine
//!
//! Implicit nonlinear elastodynamics on tetrahedral meshes.
//!
//! The engine advances a tetra mesh through backward Euler timesteps (or
//! equilibrium solves) with a Newton outer loop and a matrix-free
//! conjugate-gradient inner loop. No stiffness matrix is ever assembled:
//! every CG matrix-vector product is one force-differential evaluation
//! over the elements.
//!
//! ## Pipeline
//!
//! ```text
//! let mut engine = Engine::new(&mesh, config, Box::new(NeoHookean::default()))?;
//! loop {
//!     engine.input_data(&mesh);
//!     let report = engine.solve_next_timestep(dt)?;
//!     engine.step_to_next();
//!     engine.output_data(&mut mesh);
//! }
//! ```

pub mod config;
pub mod elements;
pub mod engine;
pub mod state;

pub use config::EngineConfig;
pub use elements::{ElementSet, RestTetra};
pub use engine::{Engine, StepReport};
pub use state::SimState;
