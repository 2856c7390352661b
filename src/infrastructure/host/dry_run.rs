//! Dry-run host: prints what would be executed
//!
//! Remote commands and uploads are written out instead of run and always
//! succeed with empty output. Local commands (the `git log` revision lookup)
//! still run for real since they do not change anything.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use super::process::{run_local, DEFAULT_TIMEOUT};
use crate::domain::ports::{CommandOutput, HostResult, RemoteHost};

pub struct DryRunHost {
    destination: String,
    timeout: Duration,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl DryRunHost {
    /// Dry-run host printing to stdout
    pub fn stdout(destination: impl Into<String>) -> Self {
        Self::with_writer(destination, io::stdout())
    }

    /// Dry-run host printing to stderr (keeps stdout clean for `--json`)
    pub fn stderr(destination: impl Into<String>) -> Self {
        Self::with_writer(destination, io::stderr())
    }

    pub fn with_writer<W: Write + Send + 'static>(destination: impl Into<String>, writer: W) -> Self {
        Self {
            destination: destination.into(),
            timeout: DEFAULT_TIMEOUT,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn print(&self, line: &str) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "[dry-run] {}", line);
            let _ = writer.flush();
        }
    }
}

impl RemoteHost for DryRunHost {
    fn destination(&self) -> String {
        self.destination.clone()
    }

    fn run(&self, command: &str) -> HostResult<CommandOutput> {
        self.print(&format!("{}$ {}", self.destination, command));
        Ok(CommandOutput::default())
    }

    fn run_with_input(&self, command: &str, input: &str) -> HostResult<CommandOutput> {
        self.print(&format!(
            "{}$ {} <<< ({} bytes)",
            self.destination,
            command,
            input.len()
        ));
        Ok(CommandOutput::default())
    }

    fn run_privileged(&self, command: &str) -> HostResult<CommandOutput> {
        self.print(&format!("{}# {}", self.destination, command));
        Ok(CommandOutput::default())
    }

    fn upload(&self, local: &Path, remote_dir: &str) -> HostResult<()> {
        self.print(&format!(
            "upload {} -> {}:{}/",
            local.display(),
            self.destination,
            remote_dir
        ));
        Ok(())
    }

    fn run_local(&self, command: &str) -> HostResult<CommandOutput> {
        run_local(command, self.timeout)
    }
}
