//! Files inside `source/<project_name>/`
//!
//! Each wrapper fixes the file name; the directory comes from the layout.

use rand::rngs::OsRng;
use rand::Rng;

use crate::domain::ports::{CommandOutput, RemoteHost};
use crate::domain::value_objects::RemotePath;
use crate::error::DeployerResult;

use super::python_env::PythonEnv;
use super::remote_file::RemoteFile;

/// Characters a generated secret key is drawn from
pub const SECRET_KEY_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

/// Length of a generated secret key
pub const SECRET_KEY_LENGTH: usize = 50;

/// Import appended to `settings.py` so Django picks up the generated key
pub const SECRET_KEY_IMPORT: &str = "\nfrom . secret_key import SECRET_KEY";

/// The project's `settings.py`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsFile(RemoteFile);

impl SettingsFile {
    pub const NAME: &'static str = "settings.py";

    pub fn new(project_package: RemotePath) -> Self {
        Self(RemoteFile::new(project_package, Self::NAME))
    }

    pub fn file(&self) -> &RemoteFile {
        &self.0
    }

    pub fn path(&self) -> &RemotePath {
        self.0.path()
    }

    /// Turn the checked-in development settings into production settings
    ///
    /// Runs three edits in order: disable `DEBUG`, pin `ALLOWED_HOSTS` to
    /// `site_url`, append the secret key import. Calling it twice appends the
    /// import twice.
    pub fn update<H: RemoteHost>(&self, host: &H, site_url: &str) -> DeployerResult<()> {
        self.0.substitute(host, "DEBUG = True", "DEBUG = False")?;
        self.0.substitute(
            host,
            "ALLOWED_HOSTS =.+$",
            &format!(r#"ALLOWED_HOSTS = ["{}"]"#, site_url.replace('$', "$$")),
        )?;
        self.0.append(host, SECRET_KEY_IMPORT)
    }
}

/// `secret_key.py`, generated on the host at deploy time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretKeyFile(RemoteFile);

impl SecretKeyFile {
    pub const NAME: &'static str = "secret_key.py";

    pub fn new(project_package: RemotePath) -> Self {
        Self(RemoteFile::new(project_package, Self::NAME))
    }

    pub fn path(&self) -> &RemotePath {
        self.0.path()
    }

    /// Fresh random key from the OS CSPRNG
    pub fn generate_key() -> String {
        let mut rng = OsRng;
        (0..SECRET_KEY_LENGTH)
            .map(|_| SECRET_KEY_ALPHABET[rng.gen_range(0..SECRET_KEY_ALPHABET.len())] as char)
            .collect()
    }

    /// Touch the file and append `SECRET_KEY = '<new key>'`
    pub fn create<H: RemoteHost>(&self, host: &H) -> DeployerResult<()> {
        self.0.touch(host)?;
        let key = Self::generate_key();
        self.0.append(host, &format!("SECRET_KEY = '{}'", key))
    }
}

/// `requirements.txt`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementsFile(RemoteFile);

impl RequirementsFile {
    pub const NAME: &'static str = "requirements.txt";

    pub fn new(project_package: RemotePath) -> Self {
        Self(RemoteFile::new(project_package, Self::NAME))
    }

    pub fn path(&self) -> &RemotePath {
        self.0.path()
    }
}

/// `manage.py`, the gateway for Django management commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagementScript(RemoteFile);

impl ManagementScript {
    pub const NAME: &'static str = "manage.py";

    pub fn new(project_package: RemotePath) -> Self {
        Self(RemoteFile::new(project_package, Self::NAME))
    }

    pub fn path(&self) -> &RemotePath {
        self.0.path()
    }

    /// `<env python> manage.py <command>`
    pub fn execute<H: RemoteHost>(
        &self,
        host: &H,
        env: &PythonEnv,
        command: &str,
    ) -> DeployerResult<CommandOutput> {
        env.execute_python(host, &format!("{} {}", self.path().quoted(), command))
    }
}
