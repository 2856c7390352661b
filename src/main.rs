//! django-deployer CLI
//!
//! Usage: django-deployer [OPTIONS] <COMMAND>
//!
//! Commands:
//!   deploy         First deployment of the site
//!   update         Move the checkout to a new revision
//!   settings       Rewrite settings.py for production
//!   create-env     Create the virtualenv
//!   install        Install requirements
//!   migrate        Run database migrations
//!   collectstatic  Collect static files
//!   restart        Restart the gunicorn service
//!   layout         Print the resolved remote paths

mod commands;

use anyhow::Result;
use clap::Parser;

use django_deployer::presentation::{init_tracing, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    commands::run(cli)
}
