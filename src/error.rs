//! Error types for django-deployer
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::HostError;

/// Result type alias for deployment operations
pub type DeployerResult<T> = Result<T, DeployerError>;

/// Main error type for deployment operations
///
/// Every variant is fatal: the run stops at the first error and nothing that
/// was already applied on the host is rolled back.
#[derive(Error, Debug)]
pub enum DeployerError {
    /// A remote command failed or timed out
    #[error(transparent)]
    Host(#[from] HostError),

    /// `git log` on the local working copy failed
    #[error("could not determine local revision: {0}")]
    LocalRevision(#[source] HostError),

    /// `git log` succeeded but printed nothing
    #[error("could not determine local revision: git log printed no commit")]
    EmptyRevision,

    /// Copying a file to the host failed
    #[error("failed to upload {} to {remote}: {source}", local.display())]
    Upload {
        local: PathBuf,
        remote: String,
        #[source]
        source: HostError,
    },

    /// Regex passed to a file substitution does not compile
    #[error("invalid substitution pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A file to be rewritten holds bytes that are not UTF-8
    #[error("refusing to rewrite {path}: content is not valid UTF-8")]
    NotUtf8 { path: String },

    /// Required configuration key is absent
    #[error("missing required configuration key '{key}'")]
    MissingConfig { key: String },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {}: {message}", file.display())]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_config() {
        let err = DeployerError::MissingConfig {
            key: "project.repo".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "missing required configuration key 'project.repo'"
        );
    }

    #[test]
    fn test_error_display_upload() {
        let err = DeployerError::Upload {
            local: PathBuf::from("server_settings.py"),
            remote: "/srv/app/source/app".to_string(),
            source: HostError::CommandFailed {
                command: "scp".to_string(),
                status: Some(1),
                stderr: String::new(),
            },
        };
        assert!(err
            .to_string()
            .starts_with("failed to upload server_settings.py to /srv/app/source/app"));
    }

    #[test]
    fn test_error_display_not_utf8() {
        let err = DeployerError::NotUtf8 {
            path: "/srv/app/settings.py".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "refusing to rewrite /srv/app/settings.py: content is not valid UTF-8"
        );
    }

    #[test]
    fn test_host_error_is_transparent() {
        let err: DeployerError = HostError::Timeout {
            command: "git fetch".to_string(),
            after: std::time::Duration::from_secs(5),
        }
        .into();
        assert_eq!(err.to_string(), "command timed out after 5s: git fetch");
    }
}
