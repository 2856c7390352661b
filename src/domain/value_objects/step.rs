//! Deployment operations and the steps they are made of

use std::fmt;

/// A public operation of the deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Deploy,
    Update,
    TemplateSettings,
    CreateEnvironment,
    InstallPackages,
    MigrateDatabase,
    CollectStatic,
    RestartServer,
}

impl Operation {
    /// Stable identifier used in JSON events
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Deploy => "deploy",
            Operation::Update => "update",
            Operation::TemplateSettings => "settings",
            Operation::CreateEnvironment => "create-env",
            Operation::InstallPackages => "install",
            Operation::MigrateDatabase => "migrate",
            Operation::CollectStatic => "collectstatic",
            Operation::RestartServer => "restart",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One remote side effect (or local lookup) inside an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    ResolveRevision,
    MakeDirectories,
    CloneSource,
    FetchSource,
    ResetSource,
    CreateSecretKey,
    UploadSettings,
    TemplateSettings,
    CreateEnvironment,
    InstallPackages,
    MigrateDatabase,
    CollectStatic,
    RestartServer,
}

impl Step {
    /// Stable identifier used in JSON events
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::ResolveRevision => "resolve-revision",
            Step::MakeDirectories => "make-directories",
            Step::CloneSource => "clone-source",
            Step::FetchSource => "fetch-source",
            Step::ResetSource => "reset-source",
            Step::CreateSecretKey => "create-secret-key",
            Step::UploadSettings => "upload-settings",
            Step::TemplateSettings => "template-settings",
            Step::CreateEnvironment => "create-environment",
            Step::InstallPackages => "install-packages",
            Step::MigrateDatabase => "migrate-database",
            Step::CollectStatic => "collect-static",
            Step::RestartServer => "restart-server",
        }
    }

    /// Human readable label for console output
    pub fn label(&self) -> &'static str {
        match self {
            Step::ResolveRevision => "Resolving revision",
            Step::MakeDirectories => "Creating directories",
            Step::CloneSource => "Cloning source",
            Step::FetchSource => "Fetching source",
            Step::ResetSource => "Resetting source",
            Step::CreateSecretKey => "Generating secret key",
            Step::UploadSettings => "Uploading server settings",
            Step::TemplateSettings => "Templating settings",
            Step::CreateEnvironment => "Creating virtualenv",
            Step::InstallPackages => "Installing packages",
            Step::MigrateDatabase => "Migrating database",
            Step::CollectStatic => "Collecting static files",
            Step::RestartServer => "Restarting server",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
