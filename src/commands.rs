//! Command handlers
//!
//! Loads configuration, builds the host and runs one deployment operation.

use anyhow::{Context, Result};

use django_deployer::application::{Deployment, DeploymentSettings};
use django_deployer::config::Config;
use django_deployer::domain::entities::{
    ManagementScript, RequirementsFile, SecretKeyFile, SettingsFile,
};
use django_deployer::domain::ports::RemoteHost;
use django_deployer::domain::value_objects::DeploymentLayout;
use django_deployer::presentation::factory;
use django_deployer::presentation::{Cli, Commands};

pub fn run(cli: Cli) -> Result<()> {
    let working_dir = std::env::current_dir().context("cannot determine working directory")?;
    let (mut config, _warnings) = Config::load_or_default(cli.config.as_deref(), &working_dir)
        .context("failed to load configuration")?;
    cli.apply_overrides(&mut config);

    let settings = config.deployment_settings()?;

    if cli.command == Commands::Layout {
        print_layout(&settings, cli.json);
        return Ok(());
    }

    if cli.dry_run {
        let host = factory::dry_run_host(&config, cli.json)?;
        execute(host, settings, &cli)
    } else {
        let host = factory::ssh_host(&config)?;
        execute(host, settings, &cli)
    }
}

fn execute<H: RemoteHost>(host: H, settings: DeploymentSettings, cli: &Cli) -> Result<()> {
    let deployment = Deployment::new(host, settings).with_events(factory::event_sink(cli.json));

    match &cli.command {
        Commands::Deploy { commit } => deployment.deploy(commit.as_deref())?,
        Commands::Update { commit } => deployment.update(commit.as_deref())?,
        Commands::Settings => deployment.template_settings()?,
        Commands::CreateEnv => deployment.create_environment()?,
        Commands::Install => deployment.install_packages()?,
        Commands::Migrate => deployment.migrate_database()?,
        Commands::Collectstatic => deployment.update_static_files()?,
        Commands::Restart => deployment.restart_server()?,
        Commands::Layout => {}
    }
    Ok(())
}

fn print_layout(settings: &DeploymentSettings, json: bool) {
    let layout = DeploymentLayout::new(
        &settings.root_directory,
        settings.home.clone(),
        &settings.site_url,
        &settings.project_name,
    );
    let package = layout.project_package().clone();

    let entries = [
        ("project", layout.project().to_string()),
        ("source", layout.source().to_string()),
        ("virtualenv", layout.virtualenv().to_string()),
        ("static", layout.static_files().to_string()),
        ("settings", SettingsFile::new(package.clone()).path().to_string()),
        ("secret_key", SecretKeyFile::new(package.clone()).path().to_string()),
        ("requirements", RequirementsFile::new(package.clone()).path().to_string()),
        ("manage", ManagementScript::new(package).path().to_string()),
        ("service", settings.service_name()),
    ];

    if json {
        let map: serde_json::Map<String, serde_json::Value> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.clone())))
            .collect();
        println!("{}", serde_json::Value::Object(map));
    } else {
        for (name, path) in &entries {
            println!("{:<14}{}", name, path);
        }
    }
}
