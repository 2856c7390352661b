//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Building the host and event sink from configuration
//! - Tracing setup
//!
//! ## Structure
//!
//! - `cli` - Argument definitions
//! - `factory` - Creates hosts and sinks (dependency injection)
//! - `logging` - `tracing-subscriber` initialisation

pub mod cli;
pub mod factory;
pub mod logging;

pub use cli::{Cli, Commands};
pub use logging::init_tracing;
