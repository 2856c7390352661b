//! Common test utilities for CLI tests.
//!
//! `TestEnv` is an isolated project directory with fake `ssh`, `scp` and
//! `git` executables first on `PATH`:
//!
//! - `ssh` appends the remote command (its last argument) to `ssh.log`,
//!   stores any stdin it receives in `stdin.log`, answers `cat '<file>'` with
//!   the content of `remote_settings.py`, and fails when the command contains
//!   `$FAKE_SSH_FAIL`.
//! - `scp` appends its last two arguments to `scp.log`.
//! - `git` prints `$FAKE_GIT_COMMIT` for `git log`.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

pub const FAKE_COMMIT: &str = "0123456789abcdef0123456789abcdef01234567";

pub const CONFIG: &str = r#"
[connection]
host = "example.com"
user = "deploy"

[project]
name = "mysite"
repo = "git@github.com:acme/mysite.git"
"#;

pub const REMOTE_SETTINGS: &str = "\
DEBUG = True
ALLOWED_HOSTS = []
SECRET_KEY = 'dev'
";

/// Result of running the CLI
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub struct TestEnv {
    pub root: TempDir,
    envs: Vec<(String, String)>,
}

impl TestEnv {
    /// Project with `deployer.toml` and `server_settings.py`
    pub fn new() -> Self {
        Self::with_config(CONFIG)
    }

    pub fn with_config(config: &str) -> Self {
        let env = Self::bare();
        env.write("deployer.toml", config);
        env.write("server_settings.py", "DATABASES = {}\n");
        env
    }

    /// Fake binaries only, no project files
    pub fn bare() -> Self {
        let root = tempfile::tempdir().unwrap();
        let env = Self {
            root,
            envs: Vec::new(),
        };
        fs::create_dir_all(env.path("bin")).unwrap();
        fs::create_dir_all(env.path("home/.config")).unwrap();
        env.write("remote_settings.py", REMOTE_SETTINGS);
        env.install_fakes();
        env
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).unwrap_or_default()
    }

    /// Remote commands in the order they were issued
    pub fn ssh_commands(&self) -> Vec<String> {
        self.read("ssh.log").lines().map(str::to_string).collect()
    }

    pub fn scp_calls(&self) -> Vec<String> {
        self.read("scp.log").lines().map(str::to_string).collect()
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        let path = format!(
            "{}:{}",
            self.path("bin").display(),
            std::env::var("PATH").unwrap_or_default()
        );

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_django-deployer"));
        cmd.current_dir(self.root.path())
            .args(args)
            .env("PATH", path)
            .env("HOME", self.path("home"))
            .env("XDG_CONFIG_HOME", self.path("home/.config"))
            .env("USER", "localuser")
            .env("FAKE_GIT_COMMIT", FAKE_COMMIT)
            .env("FAKE_LOG_DIR", self.root.path())
            .env_remove("RUST_LOG")
            .env_remove("FAKE_SSH_FAIL");
        for key in [
            "DEPLOYER_HOST",
            "DEPLOYER_USER",
            "DEPLOYER_PORT",
            "DEPLOYER_URL",
            "DEPLOYER_TIMEOUT_SECS",
        ] {
            cmd.env_remove(key);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }

        let output = cmd.output().unwrap();
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    fn install_fakes(&self) {
        self.script(
            "ssh",
            r#"#!/bin/sh
for last; do :; done
printf '%s\n' "$last" >> "$FAKE_LOG_DIR/ssh.log"
input=$(cat)
if [ -n "$input" ]; then
  printf '%s\n---\n' "$input" >> "$FAKE_LOG_DIR/stdin.log"
fi
if [ -n "${FAKE_SSH_FAIL-}" ]; then
  case "$last" in
    *"$FAKE_SSH_FAIL"*) echo "remote failure: $last" >&2; exit 3 ;;
  esac
fi
case "$last" in
  "cat '"*) cat "$FAKE_LOG_DIR/remote_settings.py" ;;
esac
exit 0
"#,
        );
        self.script(
            "scp",
            r#"#!/bin/sh
n=$#
i=0
line=""
for arg; do
  i=$((i + 1))
  if [ $i -ge $((n - 1)) ]; then
    line="$line $arg"
  fi
done
echo "${line# }" >> "$FAKE_LOG_DIR/scp.log"
exit 0
"#,
        );
        self.script(
            "git",
            r#"#!/bin/sh
if [ "$1" = "log" ]; then
  echo "$FAKE_GIT_COMMIT"
  exit 0
fi
echo "unexpected git $*" >&2
exit 1
"#,
        );
    }

    fn script(&self, name: &str, body: &str) {
        let path = self.path("bin").join(name);
        fs::write(&path, body).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }
}

pub fn contains_in_order(haystack: &[String], needles: &[&str]) -> bool {
    let mut rest = haystack.iter();
    needles
        .iter()
        .all(|needle| rest.by_ref().any(|line| line.contains(needle)))
}
