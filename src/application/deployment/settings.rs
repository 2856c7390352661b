//! Deployment Settings
//!
//! The resolved inputs of one deployment. Built from configuration by the CLI
//! or directly in code.

use std::path::PathBuf;

use crate::domain::entities::DEFAULT_SYSTEM_PYTHON;
use crate::domain::value_objects::{home_directory, RemotePath};

/// Default parent of all site directories on the host
pub const DEFAULT_ROOT_DIRECTORY: &str = "~/sites";

/// Default local file uploaded as the environment-specific settings override
pub const DEFAULT_SERVER_SETTINGS: &str = "server_settings.py";

/// Inputs of a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentSettings {
    /// Hostname the site is served under; also names the remote directory
    pub site_url: String,
    /// Django project package inside the repository
    pub project_name: String,
    /// Git URL cloned on the host
    pub repo: String,
    /// Parent directory of all sites, may start with `~`
    pub root_directory: String,
    /// Local settings override copied into the project package
    pub server_settings: PathBuf,
    /// Interpreter used to create the virtualenv
    pub system_python: String,
    /// Home directory of the remote user, used for `~` expansion
    pub home: RemotePath,
}

impl DeploymentSettings {
    pub fn new(
        site_url: impl Into<String>,
        project_name: impl Into<String>,
        repo: impl Into<String>,
        user: &str,
    ) -> Self {
        Self {
            site_url: site_url.into(),
            project_name: project_name.into(),
            repo: repo.into(),
            root_directory: DEFAULT_ROOT_DIRECTORY.to_string(),
            server_settings: PathBuf::from(DEFAULT_SERVER_SETTINGS),
            system_python: DEFAULT_SYSTEM_PYTHON.to_string(),
            home: home_directory(user),
        }
    }

    pub fn with_root_directory(mut self, root: impl Into<String>) -> Self {
        self.root_directory = root.into();
        self
    }

    pub fn with_server_settings(mut self, path: impl Into<PathBuf>) -> Self {
        self.server_settings = path.into();
        self
    }

    pub fn with_system_python(mut self, python: impl Into<String>) -> Self {
        self.system_python = python.into();
        self
    }

    pub fn with_home(mut self, home: impl Into<String>) -> Self {
        self.home = RemotePath::new(home);
        self
    }

    /// systemd unit restarted after a deploy
    pub fn service_name(&self) -> String {
        format!("gunicorn-{}", self.site_url)
    }
}
