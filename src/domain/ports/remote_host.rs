//! RemoteHost port - abstraction over the command-execution channel
//!
//! The deployment never talks to SSH directly. Everything it does on the
//! target machine goes through this trait, which lets the application layer
//! run against a real host, a dry-run printer, or an in-memory fake.

use std::path::Path;
use std::time::Duration;

/// Result type for host operations
pub type HostResult<T> = Result<T, HostError>;

/// Captured output of a finished command
///
/// `stdout` is decoded lossily for display; the exact bytes stay available
/// through [`CommandOutput::stdout_bytes`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    stdout_bytes: Vec<u8>,
}

impl CommandOutput {
    pub fn new(stdout: impl Into<String>) -> Self {
        let stdout = stdout.into();
        Self {
            stdout_bytes: stdout.clone().into_bytes(),
            stdout,
            stderr: String::new(),
        }
    }

    /// Output as read from the process pipes
    pub fn from_bytes(stdout: Vec<u8>, stderr: &[u8]) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(stderr).into_owned(),
            stdout_bytes: stdout,
        }
    }

    /// Stdout exactly as the command wrote it
    pub fn stdout_bytes(&self) -> &[u8] {
        &self.stdout_bytes
    }

    /// Whether `stdout` is the command's output without replacement characters
    pub fn is_utf8(&self) -> bool {
        std::str::from_utf8(&self.stdout_bytes).is_ok()
    }

    /// Stdout with surrounding whitespace removed
    pub fn trimmed(&self) -> &str {
        self.stdout.trim()
    }
}

/// Host operation errors
#[derive(Debug)]
pub enum HostError {
    /// The program could not be started (missing `ssh`, bad PATH, ...)
    Spawn { program: String, source: std::io::Error },
    /// The command ran and exited non-zero
    CommandFailed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },
    /// The command did not finish within the configured timeout
    Timeout { command: String, after: Duration },
    /// Writing to the command's stdin failed
    Io(std::io::Error),
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostError::Spawn { program, source } => {
                write!(f, "failed to start '{}': {}", program, source)
            }
            HostError::CommandFailed {
                command,
                status,
                stderr,
            } => {
                match status {
                    Some(code) => write!(f, "command exited with status {}: {}", code, command)?,
                    None => write!(f, "command terminated by signal: {}", command)?,
                }
                let stderr = stderr.trim();
                if !stderr.is_empty() {
                    write!(f, "\n{}", stderr)?;
                }
                Ok(())
            }
            HostError::Timeout { command, after } => {
                write!(f, "command timed out after {}s: {}", after.as_secs_f64(), command)
            }
            HostError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HostError::Spawn { source, .. } => Some(source),
            HostError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for HostError {
    fn from(err: std::io::Error) -> Self {
        HostError::Io(err)
    }
}

/// Capability interface for one target host
///
/// Implementations:
/// - `SshHost` - runs commands through the system `ssh`/`scp`
/// - `DryRunHost` - prints commands without executing them
pub trait RemoteHost {
    /// Display name of the target (`user@host`)
    fn destination(&self) -> String;

    /// Run a shell command on the remote host
    fn run(&self, command: &str) -> HostResult<CommandOutput>;

    /// Run a shell command on the remote host, feeding `input` to its stdin
    fn run_with_input(&self, command: &str, input: &str) -> HostResult<CommandOutput>;

    /// Run a shell command on the remote host with elevated privileges
    fn run_privileged(&self, command: &str) -> HostResult<CommandOutput>;

    /// Copy a local file into a remote directory
    fn upload(&self, local: &Path, remote_dir: &str) -> HostResult<()>;

    /// Run a shell command on the local machine
    fn run_local(&self, command: &str) -> HostResult<CommandOutput>;
}

impl<H: RemoteHost + ?Sized> RemoteHost for &H {
    fn destination(&self) -> String {
        (**self).destination()
    }

    fn run(&self, command: &str) -> HostResult<CommandOutput> {
        (**self).run(command)
    }

    fn run_with_input(&self, command: &str, input: &str) -> HostResult<CommandOutput> {
        (**self).run_with_input(command, input)
    }

    fn run_privileged(&self, command: &str) -> HostResult<CommandOutput> {
        (**self).run_privileged(command)
    }

    fn upload(&self, local: &Path, remote_dir: &str) -> HostResult<()> {
        (**self).upload(local, remote_dir)
    }

    fn run_local(&self, command: &str) -> HostResult<CommandOutput> {
        (**self).run_local(command)
    }
}

/// Remote path an uploaded file lands at
pub fn upload_target(local: &Path, remote_dir: &str) -> String {
    let name = local
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}/{}", remote_dir.trim_end_matches('/'), name)
}
