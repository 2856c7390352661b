//! Domain Layer
//!
//! The deployment model without any transport code.
//!
//! ## Structure
//!
//! - `entities/` - Remote files and the virtualenv
//! - `value_objects/` - Remote paths, the site layout, operation/step names
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No direct I/O** - Every side effect goes through the `RemoteHost` port
//! 2. **Explicit paths** - All remote paths are derived once from the layout

pub mod entities;
pub mod ports;
pub mod value_objects;
