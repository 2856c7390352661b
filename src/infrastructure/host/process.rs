//! Blocking process execution with a deadline
//!
//! Shared by the SSH host (for `ssh`/`scp`) and by local commands. Output is
//! drained on background threads so a chatty command cannot fill its pipe and
//! stall while we wait for it.

use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::domain::ports::{CommandOutput, HostError, HostResult};

/// Default per-command timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Run `command` to completion, failing on non-zero exit or after `timeout`
///
/// `label` is what ends up in errors and logs.
pub fn run_process(
    mut command: Command,
    label: &str,
    input: Option<&str>,
    timeout: Duration,
) -> HostResult<CommandOutput> {
    let program = command.get_program().to_string_lossy().into_owned();

    command
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command
        .spawn()
        .map_err(|source| HostError::Spawn { program, source })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let stdout_reader = thread::spawn(move || read_all(stdout));
    let stderr_reader = thread::spawn(move || read_all(stderr));

    // A child that exits before reading all input (ssh refusing auth, say)
    // closes the pipe; its exit status and stderr explain more than EPIPE.
    let mut write_error = None;
    if let Some(input) = input {
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(err) = stdin.write_all(input.as_bytes()) {
                debug!(command = label, error = %err, "writing stdin failed");
                write_error = Some(err);
            }
        }
    }

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait()? {
            Some(status) => break status,
            None if Instant::now() >= deadline => {
                warn!(command = label, ?timeout, "command timed out, killing it");
                let _ = child.kill();
                let _ = child.wait();
                return Err(HostError::Timeout {
                    command: label.to_string(),
                    after: timeout,
                });
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    };

    let stdout = stdout_reader.join().unwrap_or_default();
    let stderr = stderr_reader.join().unwrap_or_default();
    debug!(command = label, status = ?status.code(), "command finished");

    if !status.success() {
        return Err(HostError::CommandFailed {
            command: label.to_string(),
            status: status.code(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        });
    }
    if let Some(err) = write_error {
        return Err(HostError::Io(err));
    }

    Ok(CommandOutput::from_bytes(stdout, &stderr))
}

/// Run a shell command on this machine
pub fn run_local(command: &str, timeout: Duration) -> HostResult<CommandOutput> {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    debug!(command, "running local command");
    run_process(cmd, command, None, timeout)
}

fn read_all<R: Read>(pipe: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    buf
}
