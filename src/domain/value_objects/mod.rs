//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_warning;
mod layout;
mod remote_path;
mod step;

pub use config_warning::ConfigWarning;
pub use layout::DeploymentLayout;
pub use remote_path::{expand_user, home_directory, join, shell_quote, RemotePath};
pub use step::{Operation, Step};
