//! django-deployer - deploy a Django site to a Linux host over SSH
//!
//! Creates the site directory layout on the host, checks out the project from
//! git, writes a secret key and the server settings override, manages the
//! virtualenv and runs the usual `manage.py` commands.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{Deployment, DeploymentSettings};
pub use config::Config;
pub use domain::ports::{DeployEvent, DeployEventSink, RemoteHost};
pub use domain::value_objects::{DeploymentLayout, RemotePath};
pub use error::{DeployerError, DeployerResult};
pub use infrastructure::{DryRunHost, SshHost};
