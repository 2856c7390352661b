//! Console Event Sink
//!
//! Human-readable progress lines for interactive use.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEventSink {
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn line(&self, text: &str) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", text);
            let _ = writer.flush();
        }
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        match event {
            DeployEvent::Started {
                operation,
                destination,
            } => self.line(&format!("🚀 {} → {}", operation, destination)),
            DeployEvent::RevisionResolved { revision } => {
                self.line(&format!("   revision {}", revision))
            }
            // Completion lines carry the label; nothing to show yet
            DeployEvent::StepStarted { .. } => {}
            DeployEvent::StepCompleted { step } => self.line(&format!("  ✓ {}", step.label())),
            DeployEvent::StepFailed { step, error } => {
                self.line(&format!("  ✗ {}", step.label()));
                for detail in error.lines() {
                    self.line(&format!("    {}", detail));
                }
            }
            DeployEvent::Completed { operation } => self.line(&format!("✓ {} finished", operation)),
        }
    }
}
