//! Deployment Use Case
//!
//! Composes directories, files and the virtualenv into the operations an
//! operator runs against a host:
//!
//! - `deploy` - first install: directories, clone, secret key, settings upload
//! - `update` - fetch + hard reset, settings upload
//! - `template_settings`, `create_environment`, `install_packages`,
//!   `migrate_database`, `update_static_files`, `restart_server`
//!
//! Operations never call each other implicitly. A full rollout is composed by
//! the caller, e.g. `deploy` → `create_environment` → `install_packages` →
//! `template_settings` → `migrate_database` → `update_static_files` →
//! `restart_server`.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::entities::{
    ManagementScript, PythonEnv, RequirementsFile, SecretKeyFile, SettingsFile,
};
use crate::domain::ports::{
    upload_target, CommandOutput, DeployEvent, DeployEventSink, NoopEventSink, RemoteHost,
};
use crate::domain::value_objects::{
    join, shell_quote, DeploymentLayout, Operation, RemotePath, Step,
};
use crate::error::{DeployerError, DeployerResult};

use super::settings::DeploymentSettings;

/// Command used to find the revision checked out locally
pub const LOCAL_COMMIT_COMMAND: &str = "git log -n 1 --format=%H";

/// Deployment of one Django site to one host
///
/// All remote paths are computed in [`Deployment::new`] and never change
/// afterwards.
pub struct Deployment<H: RemoteHost> {
    host: H,
    settings: DeploymentSettings,
    layout: DeploymentLayout,
    settings_file: SettingsFile,
    secret_key_file: SecretKeyFile,
    requirements_file: RequirementsFile,
    management: ManagementScript,
    python_env: PythonEnv,
    events: Arc<dyn DeployEventSink>,
}

impl<H: RemoteHost> Deployment<H> {
    pub fn new(host: H, settings: DeploymentSettings) -> Self {
        let layout = DeploymentLayout::new(
            &settings.root_directory,
            settings.home.clone(),
            &settings.site_url,
            &settings.project_name,
        );
        let package = layout.project_package().clone();

        Self {
            settings_file: SettingsFile::new(package.clone()),
            secret_key_file: SecretKeyFile::new(package.clone()),
            requirements_file: RequirementsFile::new(package.clone()),
            management: ManagementScript::new(package),
            python_env: PythonEnv::new(layout.virtualenv().clone(), &settings.system_python),
            host,
            settings,
            layout,
            events: Arc::new(NoopEventSink),
        }
    }

    /// Report progress to `sink`
    pub fn with_events(mut self, sink: Arc<dyn DeployEventSink>) -> Self {
        self.events = sink;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn settings(&self) -> &DeploymentSettings {
        &self.settings
    }

    pub fn layout(&self) -> &DeploymentLayout {
        &self.layout
    }

    pub fn settings_file(&self) -> &SettingsFile {
        &self.settings_file
    }

    pub fn secret_key_file(&self) -> &SecretKeyFile {
        &self.secret_key_file
    }

    pub fn requirements_file(&self) -> &RequirementsFile {
        &self.requirements_file
    }

    pub fn management(&self) -> &ManagementScript {
        &self.management
    }

    pub fn python_env(&self) -> &PythonEnv {
        &self.python_env
    }

    /// Expand a leading `~` to the remote user's home
    pub fn expand_user(&self, path: &str) -> RemotePath {
        self.layout.expand_user(path)
    }

    /// Join path segments with `/`
    pub fn join<S: AsRef<str>>(&self, segments: &[S]) -> String {
        join(segments)
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// First install of the site
    ///
    /// Creates the directories, clones `commit` (default: the local HEAD),
    /// writes a fresh secret key and uploads the server settings. Packages,
    /// migrations and the service restart are separate operations.
    pub fn deploy(&self, commit: Option<&str>) -> DeployerResult<()> {
        self.operation(Operation::Deploy, || {
            let revision = self.resolve_revision(commit)?;
            self.step(Step::MakeDirectories, || self.make_directories().map(|_| ()))?;
            self.step(Step::CloneSource, || self.clone_source(&revision))?;
            self.step(Step::CreateSecretKey, || {
                self.secret_key_file.create(&self.host)
            })?;
            self.step(Step::UploadSettings, || self.copy_server_settings())
        })
    }

    /// Move an existing checkout to `commit` (default: the local HEAD)
    pub fn update(&self, commit: Option<&str>) -> DeployerResult<()> {
        self.operation(Operation::Update, || {
            let revision = self.resolve_revision(commit)?;
            self.step(Step::FetchSource, || self.fetch_source())?;
            self.step(Step::ResetSource, || self.reset_source(&revision))?;
            self.step(Step::UploadSettings, || self.copy_server_settings())
        })
    }

    /// Rewrite `settings.py` for production
    pub fn template_settings(&self) -> DeployerResult<()> {
        self.operation(Operation::TemplateSettings, || {
            self.step(Step::TemplateSettings, || {
                self.settings_file.update(&self.host, &self.settings.site_url)
            })
        })
    }

    /// Create (or re-create over) the virtualenv
    pub fn create_environment(&self) -> DeployerResult<()> {
        self.operation(Operation::CreateEnvironment, || {
            self.step(Step::CreateEnvironment, || self.python_env.create(&self.host))
        })
    }

    /// `pip install -r requirements.txt` inside the virtualenv
    pub fn install_packages(&self) -> DeployerResult<()> {
        self.operation(Operation::InstallPackages, || {
            self.step(Step::InstallPackages, || {
                self.python_env
                    .update_packages(&self.host, &self.requirements_file)
            })
        })
    }

    /// `manage.py collectstatic --noinput`
    pub fn update_static_files(&self) -> DeployerResult<()> {
        self.operation(Operation::CollectStatic, || {
            self.step(Step::CollectStatic, || {
                self.manage("collectstatic --noinput").map(|_| ())
            })
        })
    }

    /// `manage.py migrate --noinput`
    pub fn migrate_database(&self) -> DeployerResult<()> {
        self.operation(Operation::MigrateDatabase, || {
            self.step(Step::MigrateDatabase, || {
                self.manage("migrate --noinput").map(|_| ())
            })
        })
    }

    /// `sudo systemctl restart gunicorn-<site_url>`
    pub fn restart_server(&self) -> DeployerResult<()> {
        self.operation(Operation::RestartServer, || {
            self.step(Step::RestartServer, || {
                let service = self.settings.service_name();
                self.host
                    .run_privileged(&format!("systemctl restart {}", shell_quote(&service)))?;
                Ok(())
            })
        })
    }

    // ------------------------------------------------------------------
    // Building blocks
    // ------------------------------------------------------------------

    /// Commit hash of the local working copy's HEAD
    pub fn local_commit(&self) -> DeployerResult<String> {
        let output = self
            .host
            .run_local(LOCAL_COMMIT_COMMAND)
            .map_err(DeployerError::LocalRevision)?;
        let commit = output.trimmed();
        if commit.is_empty() {
            return Err(DeployerError::EmptyRevision);
        }
        Ok(commit.to_string())
    }

    /// `mkdir -p` every layout directory, parents first
    pub fn make_directories(&self) -> DeployerResult<Vec<RemotePath>> {
        let directories = self.layout.directories();
        for directory in &directories {
            debug!(directory = %directory, "creating directory");
            directory.create(&self.host)?;
        }
        Ok(directories)
    }

    /// Clone the repository into `source/` and check out `revision`
    pub fn clone_source(&self, revision: &str) -> DeployerResult<()> {
        let source = self.layout.source();
        self.host.run(&format!(
            "git clone {} {}",
            shell_quote(&self.settings.repo),
            source.quoted()
        ))?;
        self.in_source(&format!("git checkout {}", shell_quote(revision)))
    }

    /// `git fetch` inside `source/`
    pub fn fetch_source(&self) -> DeployerResult<()> {
        self.in_source("git fetch")
    }

    /// `git reset --hard <revision>` inside `source/`
    pub fn reset_source(&self, revision: &str) -> DeployerResult<()> {
        self.in_source(&format!("git reset --hard {}", shell_quote(revision)))
    }

    /// Upload the local server settings into the project package
    pub fn copy_server_settings(&self) -> DeployerResult<()> {
        let local = &self.settings.server_settings;
        let remote = self.layout.project_package();
        self.host
            .upload(local, remote.as_str())
            .map_err(|source| DeployerError::Upload {
                local: local.clone(),
                remote: upload_target(local, remote.as_str()),
                source,
            })
    }

    fn manage(&self, command: &str) -> DeployerResult<CommandOutput> {
        self.management
            .execute(&self.host, &self.python_env, command)
    }

    fn in_source(&self, command: &str) -> DeployerResult<()> {
        self.host
            .run(&format!("cd {} && {}", self.layout.source().quoted(), command))?;
        Ok(())
    }

    fn resolve_revision(&self, commit: Option<&str>) -> DeployerResult<String> {
        let revision = match commit {
            Some(commit) => commit.to_string(),
            None => self.step(Step::ResolveRevision, || self.local_commit())?,
        };
        self.events.on_event(DeployEvent::RevisionResolved {
            revision: revision.clone(),
        });
        Ok(revision)
    }

    fn operation<F>(&self, operation: Operation, body: F) -> DeployerResult<()>
    where
        F: FnOnce() -> DeployerResult<()>,
    {
        let destination = self.host.destination();
        info!(%operation, %destination, site = %self.settings.site_url, "starting");
        self.events.on_event(DeployEvent::Started {
            operation,
            destination,
        });
        body()?;
        info!(%operation, "completed");
        self.events.on_event(DeployEvent::Completed { operation });
        Ok(())
    }

    fn step<T, F>(&self, step: Step, body: F) -> DeployerResult<T>
    where
        F: FnOnce() -> DeployerResult<T>,
    {
        info!(%step, "{}", step.label());
        self.events.on_event(DeployEvent::StepStarted { step });
        match body() {
            Ok(value) => {
                self.events.on_event(DeployEvent::StepCompleted { step });
                Ok(value)
            }
            Err(err) => {
                self.events.on_event(DeployEvent::StepFailed {
                    step,
                    error: err.to_string(),
                });
                Err(err)
            }
        }
    }
}
