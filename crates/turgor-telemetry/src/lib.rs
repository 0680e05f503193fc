//! # turgor-telemetry
//!
//! Event bus for solver telemetry. The engine and optimizer drivers emit
//! structured events (Newton/CG progress, energy, convergence reports)
//! that pluggable sinks consume — a collecting vector in tests, `tracing`
//! in the CLI.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SolverEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
