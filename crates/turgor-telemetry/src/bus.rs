//! Event bus — broadcast-style event dispatch with pluggable sinks.
//!
//! Built on `std::sync::mpsc`: the producer side is cheap and never
//! blocks a solve, and consumers drain at flush points between
//! iterations or timesteps.

use std::sync::mpsc;

use crate::events::SolverEvent;
use crate::sinks::EventSink;

/// Broadcast event bus for solver telemetry.
pub struct EventBus {
    sender: mpsc::Sender<SolverEvent>,
    receiver: mpsc::Receiver<SolverEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    /// Disabled bus drops events silently.
    enabled: bool,
}

impl EventBus {
    /// Creates a new event bus with no sinks.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            sinks: Vec::new(),
            enabled: true,
        }
    }

    /// Registers a sink to receive events.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Enables or disables the bus.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns true if the bus is active.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Emits an event. No-op when the bus is disabled.
    pub fn emit(&self, event: SolverEvent) {
        if !self.enabled {
            return;
        }
        let _ = self.sender.send(event);
    }

    /// Drains all pending events to the registered sinks.
    pub fn flush(&mut self) {
        while let Ok(event) = self.receiver.try_recv() {
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
        }
    }

    /// Flushes and finalizes all sinks.
    pub fn shutdown(&mut self) {
        self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
    }

    /// Returns the number of registered sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
