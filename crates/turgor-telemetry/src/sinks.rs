//! Pluggable event sinks.

use crate::events::SolverEvent;

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Processes a single event.
    fn handle(&mut self, event: &SolverEvent);

    /// Called at shutdown. Flush buffers, close files.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// A sink that collects events into a `Vec` for tests and inspection.
pub struct VecSink {
    /// Collected events.
    pub events: Vec<SolverEvent>,
}

impl VecSink {
    /// Creates an empty vec sink.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl Default for VecSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SolverEvent) {
        self.events.push(event.clone());
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// A sink that forwards events to the `tracing` crate.
pub struct TracingSink;

impl TracingSink {
    /// Creates a new tracing sink.
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SolverEvent) {
        tracing::info!(solve = event.solve, event = ?event.kind, "solver_event");
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
