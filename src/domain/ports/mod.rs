//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod deploy_events;
pub mod remote_host;

pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink};
pub use remote_host::{upload_target, CommandOutput, HostError, HostResult, RemoteHost};
