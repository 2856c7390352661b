//! Domain Entities
//!
//! Things on the remote host that the deployment acts upon.
//! - `RemoteFile` - a single file and its edit operations
//! - `SettingsFile`, `SecretKeyFile`, `RequirementsFile`, `ManagementScript`
//! - `PythonEnv` - the site's virtualenv

mod project_files;
mod python_env;
mod remote_file;

pub use project_files::{
    ManagementScript, RequirementsFile, SecretKeyFile, SettingsFile, SECRET_KEY_ALPHABET,
    SECRET_KEY_IMPORT, SECRET_KEY_LENGTH,
};
pub use python_env::{PythonEnv, DEFAULT_SYSTEM_PYTHON};
pub use remote_file::{substitute_lines, RemoteFile};
