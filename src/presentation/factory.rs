//! Host Factory
//!
//! Builds the concrete host and event sink from configuration.
//! This is the dependency injection point for the binary.

use std::sync::Arc;

use crate::config::Config;
use crate::domain::ports::DeployEventSink;
use crate::error::DeployerResult;
use crate::infrastructure::{ConsoleEventSink, DryRunHost, JsonEventSink, SshHost};

/// SSH host from the `[connection]` section
pub fn ssh_host(config: &Config) -> DeployerResult<SshHost> {
    let mut host = SshHost::new(config.host()?, config.user()?)
        .with_port(config.connection.port)
        .with_identity_file(config.connection.identity_file.clone());
    if let Some(timeout) = config.timeout() {
        host = host.with_timeout(timeout);
    }
    Ok(host)
}

/// Dry-run host printing to stdout, or stderr when stdout carries JSON
pub fn dry_run_host(config: &Config, json: bool) -> DeployerResult<DryRunHost> {
    let destination = format!("{}@{}", config.user()?, config.host()?);
    let mut host = if json {
        DryRunHost::stderr(destination)
    } else {
        DryRunHost::stdout(destination)
    };
    if let Some(timeout) = config.timeout() {
        host = host.with_timeout(timeout);
    }
    Ok(host)
}

pub fn event_sink(json: bool) -> Arc<dyn DeployEventSink> {
    if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stdout())
    }
}
