//! RemoteHost implementations
//!
//! - `SshHost` - system `ssh`/`scp`
//! - `DryRunHost` - prints commands
//! - `fake::FakeHost` - in-memory, tests only

mod dry_run;
mod process;
mod ssh;

#[cfg(test)]
pub(crate) mod fake;

pub use dry_run::DryRunHost;
pub use process::{run_local, run_process, DEFAULT_TIMEOUT};
pub use ssh::{sudo, SshHost};
