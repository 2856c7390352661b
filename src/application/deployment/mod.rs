//! Deployment Module
//!
//! ## Structure
//!
//! - `settings` - Resolved inputs (`DeploymentSettings`)
//! - `use_case` - The orchestrator (`Deployment`)
//!
//! ## Usage
//!
//! ```ignore
//! use django_deployer::application::{Deployment, DeploymentSettings};
//!
//! let settings = DeploymentSettings::new("example.com", "mysite", repo, "deploy");
//! let deployment = Deployment::new(host, settings);
//! deployment.deploy(None)?;
//! ```

mod settings;
mod use_case;

pub use settings::{DeploymentSettings, DEFAULT_ROOT_DIRECTORY, DEFAULT_SERVER_SETTINGS};
pub use use_case::{Deployment, LOCAL_COMMIT_COMMAND};
