//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::DeploymentSettings;
use crate::error::{DeployerError, DeployerResult};

use super::loader::{self, ConfigWarning};

/// How to reach the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConnectionConfig {
    #[serde(default)]
    pub host: Option<String>,

    /// Login user; `$USER` when unset
    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub identity_file: Option<PathBuf>,

    /// Per-command timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Remote home directory when it is not `/home/<user>`
    #[serde(default)]
    pub home: Option<String>,
}

/// What to deploy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProjectConfig {
    /// Django project package name
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub repo: Option<String>,

    /// Site URL; the host name when unset
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub root_directory: Option<String>,

    #[serde(default)]
    pub server_settings: Option<PathBuf>,

    #[serde(default)]
    pub system_python: Option<String>,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub connection: ConnectionConfig,

    #[serde(default)]
    pub project: ProjectConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> DeployerResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> DeployerResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from the explicit file, `deployer.toml` in `working_dir`, the
    /// user config, or defaults; then apply environment overrides
    pub fn load_or_default(
        explicit: Option<&Path>,
        working_dir: &Path,
    ) -> DeployerResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(explicit, working_dir)
    }

    /// Apply environment variable overrides (DEPLOYER_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    pub fn host(&self) -> DeployerResult<&str> {
        self.connection.host.as_deref().ok_or_else(|| missing("connection.host"))
    }

    /// Login user, falling back to `$USER`
    pub fn user(&self) -> DeployerResult<String> {
        self.connection
            .user
            .clone()
            .or_else(|| std::env::var("USER").ok().filter(|u| !u.is_empty()))
            .ok_or_else(|| missing("connection.user"))
    }

    /// Site URL, falling back to the host name
    pub fn site_url(&self) -> DeployerResult<String> {
        match &self.project.url {
            Some(url) => Ok(url.clone()),
            None => self.host().map(str::to_string),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.connection.timeout_secs.map(Duration::from_secs)
    }

    /// Validate and resolve into deployment inputs
    pub fn deployment_settings(&self) -> DeployerResult<DeploymentSettings> {
        let name = self.project.name.as_deref().ok_or_else(|| missing("project.name"))?;
        let repo = self.project.repo.as_deref().ok_or_else(|| missing("project.repo"))?;
        let user = self.user()?;

        let mut settings = DeploymentSettings::new(self.site_url()?, name, repo, &user);
        if let Some(root) = &self.project.root_directory {
            settings = settings.with_root_directory(root.clone());
        }
        if let Some(path) = &self.project.server_settings {
            settings = settings.with_server_settings(path.clone());
        }
        if let Some(python) = &self.project.system_python {
            settings = settings.with_system_python(python.clone());
        }
        if let Some(home) = &self.connection.home {
            settings = settings.with_home(home.clone());
        }
        Ok(settings)
    }
}

fn missing(key: &str) -> DeployerError {
    DeployerError::MissingConfig {
        key: key.to_string(),
    }
}
