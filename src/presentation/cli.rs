//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--config, --host, --json, --dry-run, --verbose) are inherited by all subcommands
//! - `--host`, `--user` and `--url` win over the config file and `DEPLOYER_*` variables

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

/// django-deployer - deploy a Django site to a host over SSH
#[derive(Parser, Debug)]
#[command(name = "django-deployer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./deployer.toml)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Host to deploy to
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// SSH login user
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Site URL (defaults to the host)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Print remote commands instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// First deployment: create directories, clone, secret key, server settings
    Deploy {
        /// Revision to check out (default: local HEAD)
        #[arg(long)]
        commit: Option<String>,
    },

    /// Move an existing checkout to a new revision
    Update {
        /// Revision to reset to (default: local HEAD)
        #[arg(long)]
        commit: Option<String>,
    },

    /// Rewrite settings.py for production
    Settings,

    /// Create the virtualenv
    CreateEnv,

    /// Install requirements.txt into the virtualenv
    Install,

    /// Run database migrations
    Migrate,

    /// Collect static files
    Collectstatic,

    /// Restart the gunicorn service
    Restart,

    /// Print the resolved remote paths
    Layout,
}

impl Cli {
    /// Apply command-line overrides on top of file and environment config
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.connection.host = Some(host.clone());
        }
        if let Some(user) = &self.user {
            config.connection.user = Some(user.clone());
        }
        if let Some(url) = &self.url {
            config.project.url = Some(url.clone());
        }
    }
}
