//! Remote Path Value Object
//!
//! A path on the target host. Paths are plain strings: the remote side is
//! always POSIX, so `std::path` semantics of the local machine do not apply.

use std::fmt;

use crate::domain::ports::{HostResult, RemoteHost};

/// A path on the remote host
///
/// Joining never normalizes: `join("a//", "b")` is `a///b`. Paths built from a
/// `DeploymentLayout` are absolute because the root has been passed through
/// [`expand_user`] first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemotePath(String);

impl RemotePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Return a child path `self/segment`
    pub fn join(&self, segment: impl AsRef<str>) -> RemotePath {
        RemotePath(format!("{}/{}", self.0, segment.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_absolute(&self) -> bool {
        self.0.starts_with('/')
    }

    /// Path quoted for use as a single shell word
    pub fn quoted(&self) -> String {
        shell_quote(&self.0)
    }

    /// `mkdir -p` this path on `host`; existing directories are fine
    pub fn create<H: RemoteHost>(&self, host: &H) -> HostResult<()> {
        host.run(&format!("mkdir -p {}", self.quoted()))?;
        Ok(())
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RemotePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Join path segments with `/`
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join("/")
}

/// Replace a leading `~` with `home`
///
/// Only `~` on its own and `~/...` are expanded; `~other/x` and paths with a
/// tilde elsewhere are returned unchanged.
pub fn expand_user(path: &str, home: &RemotePath) -> RemotePath {
    if path == "~" {
        return home.clone();
    }
    match path.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => RemotePath::new(path),
    }
}

/// Home directory of a remote account: `/home/<user>`
///
/// Accounts living elsewhere (`root`, service users) set `connection.home`.
pub fn home_directory(user: &str) -> RemotePath {
    RemotePath::new(format!("/home/{}", user))
}

/// Quote a string for safe use as one word in a POSIX shell command
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}
