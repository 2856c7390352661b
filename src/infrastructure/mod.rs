//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `host/` - RemoteHost implementations (SSH, dry-run)
//! - `events/` - DeployEventSink implementations (console, JSON)

pub mod events;
pub mod host;

// Re-export for convenience
pub use events::{ConsoleEventSink, JsonEventSink};
pub use host::{DryRunHost, SshHost};
