//! Deploy Event Port
//!
//! Provides an observable interface for deployment operations.
//! Enables progress reporting, JSON event streams, and debugging.

use crate::domain::value_objects::{Operation, Step};

/// Event emitted during deployment operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent {
    /// Operation started against a destination
    Started {
        operation: Operation,
        destination: String,
    },

    /// Revision resolved for a clone or reset
    RevisionResolved { revision: String },

    /// Step started
    StepStarted { step: Step },

    /// Step finished successfully
    StepCompleted { step: Step },

    /// Step failed; the operation stops here
    StepFailed { step: Step, error: String },

    /// Operation completed
    Completed { operation: Operation },
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - ConsoleEventSink: Progress display in terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait DeployEventSink {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {
        // Do nothing
    }
}
