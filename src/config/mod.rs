//! Configuration module for django-deployer
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (DEPLOYER_*)
//! 3. Config file (`--config`, `./deployer.toml`, or
//!    `<config dir>/django-deployer/config.toml`)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::PROJECT_CONFIG_FILE;
pub use types::{Config, ConnectionConfig, ProjectConfig};
