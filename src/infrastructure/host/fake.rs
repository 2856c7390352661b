//! In-memory host for unit tests
//!
//! Records every call in order and keeps a tiny file table so that `cat`,
//! `touch`, `cat >>` and the staged `cat > tmp && mv tmp file` write behave
//! like they would on a real machine.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::ports::{CommandOutput, HostError, HostResult, RemoteHost};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Run(String),
    RunWithInput { command: String, input: String },
    Privileged(String),
    Upload { local: PathBuf, remote_dir: String },
    Local(String),
}

impl Call {
    /// One-line rendering used by ordering assertions
    pub fn render(&self) -> String {
        match self {
            Call::Run(command) | Call::RunWithInput { command, .. } => command.clone(),
            Call::Privileged(command) => format!("sudo {}", command),
            Call::Upload { local, remote_dir } => {
                format!("upload {} {}", local.display(), remote_dir)
            }
            Call::Local(command) => format!("local {}", command),
        }
    }
}

pub struct FakeHost {
    calls: RefCell<Vec<Call>>,
    files: RefCell<BTreeMap<String, Vec<u8>>>,
    failing: Vec<String>,
    local_commit: String,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            files: RefCell::new(BTreeMap::new()),
            failing: Vec::new(),
            local_commit: "0123456789abcdef0123456789abcdef01234567".to_string(),
        }
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.with_raw_file(path, content.as_bytes())
    }

    pub fn with_raw_file(self, path: &str, content: &[u8]) -> Self {
        self.files
            .borrow_mut()
            .insert(path.to_string(), content.to_vec());
        self
    }

    /// Make any call whose rendering contains `needle` exit non-zero
    pub fn fail_on(mut self, needle: &str) -> Self {
        self.failing.push(needle.to_string());
        self
    }

    pub fn with_local_commit(mut self, commit: &str) -> Self {
        self.local_commit = commit.to_string();
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn rendered(&self) -> Vec<String> {
        self.calls.borrow().iter().map(Call::render).collect()
    }

    pub fn file(&self, path: &str) -> Option<String> {
        self.raw_file(path)
            .map(|content| String::from_utf8_lossy(&content).into_owned())
    }

    pub fn raw_file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.borrow().get(path).cloned()
    }

    fn record(&self, call: Call) -> HostResult<()> {
        let rendered = call.render();
        self.calls.borrow_mut().push(call);
        if self.failing.iter().any(|needle| rendered.contains(needle)) {
            return Err(HostError::CommandFailed {
                command: rendered,
                status: Some(1),
                stderr: "simulated failure".to_string(),
            });
        }
        Ok(())
    }
}

fn unquote(word: &str) -> String {
    let word = word.trim();
    word.strip_prefix('\'')
        .and_then(|w| w.strip_suffix('\''))
        .unwrap_or(word)
        .replace("'\\''", "'")
}

impl RemoteHost for FakeHost {
    fn destination(&self) -> String {
        "deploy@example.com".to_string()
    }

    fn run(&self, command: &str) -> HostResult<CommandOutput> {
        self.record(Call::Run(command.to_string()))?;

        if let Some(path) = command.strip_prefix("touch ") {
            self.files.borrow_mut().entry(unquote(path)).or_default();
        } else if let Some(path) = command.strip_prefix("cat ") {
            let path = unquote(path);
            return match self.files.borrow().get(&path) {
                Some(content) => Ok(CommandOutput::from_bytes(content.clone(), b"")),
                None => Err(HostError::CommandFailed {
                    command: command.to_string(),
                    status: Some(1),
                    stderr: format!("cat: {}: No such file or directory", path),
                }),
            };
        }
        Ok(CommandOutput::default())
    }

    fn run_with_input(&self, command: &str, input: &str) -> HostResult<CommandOutput> {
        self.record(Call::RunWithInput {
            command: command.to_string(),
            input: input.to_string(),
        })?;

        let mut files = self.files.borrow_mut();
        if let Some(path) = command.strip_prefix("cat >> ") {
            files
                .entry(unquote(path))
                .or_default()
                .extend_from_slice(input.as_bytes());
        } else if let Some(rest) = command.strip_prefix("cat > ") {
            match rest.split_once(" && mv ") {
                Some((staging, rename)) => {
                    let target = rename
                        .strip_prefix(staging)
                        .map(unquote)
                        .unwrap_or_else(|| unquote(rename));
                    files.insert(target, input.as_bytes().to_vec());
                }
                None => {
                    files.insert(unquote(rest), input.as_bytes().to_vec());
                }
            }
        }
        Ok(CommandOutput::default())
    }

    fn run_privileged(&self, command: &str) -> HostResult<CommandOutput> {
        self.record(Call::Privileged(command.to_string()))?;
        Ok(CommandOutput::default())
    }

    fn upload(&self, local: &Path, remote_dir: &str) -> HostResult<()> {
        self.record(Call::Upload {
            local: local.to_path_buf(),
            remote_dir: remote_dir.to_string(),
        })
    }

    fn run_local(&self, command: &str) -> HostResult<CommandOutput> {
        self.record(Call::Local(command.to_string()))?;
        Ok(CommandOutput::new(format!("{}\n", self.local_commit)))
    }
}
