//! Remote directory layout of one site
//!
//! ```text
//! <root>/<site_url>/
//!     source/                 git checkout
//!         <project_name>/     settings.py, secret_key.py, requirements.txt, manage.py
//!     virtualenv/
//!     static/
//! ```

use super::remote_path::{expand_user, RemotePath};

/// Every remote directory the deployment touches, computed once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentLayout {
    home: RemotePath,
    root: RemotePath,
    project: RemotePath,
    source: RemotePath,
    virtualenv: RemotePath,
    static_files: RemotePath,
    project_package: RemotePath,
}

impl DeploymentLayout {
    /// Build the layout for `site_url` under `root_directory`
    ///
    /// `root_directory` may start with `~`, which resolves against `home`.
    pub fn new(root_directory: &str, home: RemotePath, site_url: &str, project_name: &str) -> Self {
        let root = expand_user(root_directory, &home);
        let project = root.join(site_url);
        let source = project.join("source");
        let virtualenv = project.join("virtualenv");
        let static_files = project.join("static");
        let project_package = source.join(project_name);

        Self {
            home,
            root,
            project,
            source,
            virtualenv,
            static_files,
            project_package,
        }
    }

    pub fn home(&self) -> &RemotePath {
        &self.home
    }

    pub fn root(&self) -> &RemotePath {
        &self.root
    }

    /// `<root>/<site_url>`
    pub fn project(&self) -> &RemotePath {
        &self.project
    }

    pub fn source(&self) -> &RemotePath {
        &self.source
    }

    pub fn virtualenv(&self) -> &RemotePath {
        &self.virtualenv
    }

    pub fn static_files(&self) -> &RemotePath {
        &self.static_files
    }

    /// `source/<project_name>`, where the Django project files live
    pub fn project_package(&self) -> &RemotePath {
        &self.project_package
    }

    /// Directories to create before the first clone, in creation order
    pub fn directories(&self) -> Vec<RemotePath> {
        vec![
            self.project.clone(),
            self.source.clone(),
            self.virtualenv.clone(),
            self.static_files.clone(),
        ]
    }

    /// Expand `~` against this layout's home directory
    pub fn expand_user(&self, path: &str) -> RemotePath {
        expand_user(path, &self.home)
    }
}
