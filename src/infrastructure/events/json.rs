//! JSON Event Sink
//!
//! Outputs deployment events as NDJSON for CI/automation consumption.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use crate::domain::value_objects::Operation;
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
    /// Operation of the last `Started` event, echoed as `command`
    operation: Mutex<Option<Operation>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            operation: Mutex::new(None),
        }
    }

    fn command(&self) -> &'static str {
        self.operation
            .lock()
            .ok()
            .and_then(|op| *op)
            .map(|op| op.as_str())
            .unwrap_or("unknown")
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        let json = match event {
            DeployEvent::Started {
                operation,
                destination,
            } => {
                if let Ok(mut current) = self.operation.lock() {
                    *current = Some(operation);
                }
                serde_json::json!({
                    "event": "start",
                    "command": operation.as_str(),
                    "destination": destination,
                })
            }

            DeployEvent::RevisionResolved { revision } => {
                serde_json::json!({
                    "event": "revision",
                    "command": self.command(),
                    "revision": revision,
                })
            }

            DeployEvent::StepStarted { step } => {
                serde_json::json!({
                    "event": "step_start",
                    "command": self.command(),
                    "step": step.as_str(),
                })
            }

            DeployEvent::StepCompleted { step } => {
                serde_json::json!({
                    "event": "step_complete",
                    "command": self.command(),
                    "step": step.as_str(),
                })
            }

            DeployEvent::StepFailed { step, error } => {
                serde_json::json!({
                    "event": "step_error",
                    "command": self.command(),
                    "step": step.as_str(),
                    "error": error,
                })
            }

            DeployEvent::Completed { operation } => {
                serde_json::json!({
                    "event": "complete",
                    "command": operation.as_str(),
                    "status": "success",
                })
            }
        };

        self.write_event(json);
    }
}
