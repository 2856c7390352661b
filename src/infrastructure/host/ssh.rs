//! SSH Host Implementation
//!
//! Implements the RemoteHost port with the system `ssh` and `scp` binaries.
//! Authentication is whatever the user's ssh setup provides (agent, keys,
//! `~/.ssh/config`); `BatchMode=yes` makes a missing key fail instead of
//! prompting.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use tracing::debug;

use super::process::{run_local, run_process, DEFAULT_TIMEOUT};
use crate::domain::ports::{CommandOutput, HostResult, RemoteHost};
use crate::domain::value_objects::shell_quote;

/// Remote host reached over SSH
#[derive(Debug, Clone)]
pub struct SshHost {
    /// Hostname or address
    host: String,
    /// Login user
    user: String,
    port: Option<u16>,
    identity_file: Option<PathBuf>,
    /// Per-command timeout
    timeout: Duration,
    ssh_program: String,
    scp_program: String,
}

impl SshHost {
    pub fn new(host: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            port: None,
            identity_file: None,
            timeout: DEFAULT_TIMEOUT,
            ssh_program: "ssh".to_string(),
            scp_program: "scp".to_string(),
        }
    }

    pub fn with_port(mut self, port: Option<u16>) -> Self {
        self.port = port;
        self
    }

    pub fn with_identity_file(mut self, identity_file: Option<PathBuf>) -> Self {
        self.identity_file = identity_file;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use different `ssh`/`scp` executables
    pub fn with_programs(mut self, ssh: impl Into<String>, scp: impl Into<String>) -> Self {
        self.ssh_program = ssh.into();
        self.scp_program = scp.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn common_options(&self, cmd: &mut Command, port_flag: &str) {
        cmd.arg("-o").arg("BatchMode=yes");
        if let Some(port) = self.port {
            cmd.arg(port_flag).arg(port.to_string());
        }
        if let Some(identity) = &self.identity_file {
            cmd.arg("-i").arg(identity);
        }
    }

    fn ssh_command(&self, remote_command: &str) -> Command {
        let mut cmd = Command::new(&self.ssh_program);
        self.common_options(&mut cmd, "-p");
        cmd.arg(self.destination()).arg(remote_command);
        cmd
    }

    fn execute(&self, command: &str, input: Option<&str>) -> HostResult<CommandOutput> {
        debug!(destination = %self.destination(), command, "ssh");
        run_process(self.ssh_command(command), command, input, self.timeout)
    }
}

impl RemoteHost for SshHost {
    fn destination(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }

    fn run(&self, command: &str) -> HostResult<CommandOutput> {
        self.execute(command, None)
    }

    fn run_with_input(&self, command: &str, input: &str) -> HostResult<CommandOutput> {
        self.execute(command, Some(input))
    }

    fn run_privileged(&self, command: &str) -> HostResult<CommandOutput> {
        self.execute(&sudo(command), None)
    }

    fn upload(&self, local: &Path, remote_dir: &str) -> HostResult<()> {
        let target = format!("{}:{}/", self.destination(), remote_dir.trim_end_matches('/'));
        let mut cmd = Command::new(&self.scp_program);
        self.common_options(&mut cmd, "-P");
        cmd.arg(local).arg(&target);

        let label = format!("scp {} {}", local.display(), target);
        debug!(command = %label, "upload");
        run_process(cmd, &label, None, self.timeout)?;
        Ok(())
    }

    fn run_local(&self, command: &str) -> HostResult<CommandOutput> {
        run_local(command, self.timeout)
    }
}

/// Wrap a command for non-interactive sudo
///
/// `-n` fails immediately if a password would be needed; the deploy user is
/// expected to have passwordless sudo for the service restart.
pub fn sudo(command: &str) -> String {
    format!("sudo -n sh -c {}", shell_quote(command))
}
