//! PythonEnv entity - the site's virtualenv

use crate::domain::ports::{CommandOutput, RemoteHost};
use crate::domain::value_objects::RemotePath;
use crate::error::DeployerResult;

use super::project_files::RequirementsFile;

/// Interpreter used to bootstrap the virtualenv when none is configured
pub const DEFAULT_SYSTEM_PYTHON: &str = "python3";

/// A virtualenv rooted at a fixed remote directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonEnv {
    directory: RemotePath,
    python: RemotePath,
    pip: RemotePath,
    system_python: String,
}

impl PythonEnv {
    pub fn new(directory: RemotePath, system_python: impl Into<String>) -> Self {
        let bin = directory.join("bin");
        Self {
            python: bin.join("python"),
            pip: bin.join("pip"),
            directory,
            system_python: system_python.into(),
        }
    }

    pub fn directory(&self) -> &RemotePath {
        &self.directory
    }

    pub fn python(&self) -> &RemotePath {
        &self.python
    }

    pub fn pip(&self) -> &RemotePath {
        &self.pip
    }

    /// `<system python> -m venv <dir>`; re-running over an existing env is fine
    pub fn create<H: RemoteHost>(&self, host: &H) -> DeployerResult<()> {
        host.run(&format!(
            "{} -m venv {}",
            self.system_python,
            self.directory.quoted()
        ))?;
        Ok(())
    }

    /// Run the env's interpreter with `args` appended verbatim
    pub fn execute_python<H: RemoteHost>(
        &self,
        host: &H,
        args: &str,
    ) -> DeployerResult<CommandOutput> {
        Ok(host.run(&format!("{} {}", self.python.quoted(), args))?)
    }

    /// Run the env's pip with `args` appended verbatim
    pub fn execute_pip<H: RemoteHost>(&self, host: &H, args: &str) -> DeployerResult<CommandOutput> {
        Ok(host.run(&format!("{} {}", self.pip.quoted(), args))?)
    }

    /// `pip install -r <requirements>`
    pub fn update_packages<H: RemoteHost>(
        &self,
        host: &H,
        requirements: &RequirementsFile,
    ) -> DeployerResult<()> {
        self.execute_pip(host, &format!("install -r {}", requirements.path().quoted()))?;
        Ok(())
    }
}
