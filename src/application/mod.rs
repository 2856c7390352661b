//! Application Layer
//!
//! Use cases that orchestrate the deployment flow.
//! This layer:
//! - Depends on Domain layer (entities, value objects, ports)
//! - Does NOT talk to SSH itself (that is Infrastructure)
//!
//! ## Use Cases
//!
//! - `Deployment` - deploy, update, settings templating, virtualenv, management commands, restart

pub mod deployment;

pub use deployment::{Deployment, DeploymentSettings, LOCAL_COMMIT_COMMAND};
