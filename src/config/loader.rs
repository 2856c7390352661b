//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{DeployerError, DeployerResult};

use super::types::Config;

pub use crate::domain::value_objects::ConfigWarning;

/// Config file looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "deployer.toml";

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> DeployerResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| DeployerError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from the explicit file, the project file, the user config, or defaults
///
/// An explicit path must exist. A project or user file that exists but does
/// not parse is an error rather than silently skipped.
pub fn load_or_default(
    explicit: Option<&Path>,
    working_dir: &Path,
) -> DeployerResult<(Config, Vec<ConfigWarning>)> {
    let source = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => candidate_files(working_dir).into_iter().find(|p| p.is_file()),
    };

    let (config, warnings) = match source {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            load_with_warnings(&path)?
        }
        None => {
            debug!("no configuration file found, using defaults");
            (Config::default(), Vec::new())
        }
    };

    for warning in &warnings {
        warn!("{}", warning);
    }

    Ok((with_env_overrides(config), warnings))
}

fn candidate_files(working_dir: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![working_dir.join(PROJECT_CONFIG_FILE)];
    if let Some(user_config_dir) = dirs::config_dir() {
        candidates.push(user_config_dir.join("django-deployer/config.toml"));
    }
    candidates
}

/// Apply environment variable overrides (DEPLOYER_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_overrides_from(config, |key| std::env::var(key).ok())
}

/// Apply overrides from an arbitrary lookup; empty values are ignored
pub(crate) fn with_overrides_from(
    mut config: Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Config {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    // DEPLOYER_HOST
    if let Some(host) = get("DEPLOYER_HOST") {
        config.connection.host = Some(host);
    }

    // DEPLOYER_USER
    if let Some(user) = get("DEPLOYER_USER") {
        config.connection.user = Some(user);
    }

    // DEPLOYER_PORT
    if let Some(port) = get("DEPLOYER_PORT") {
        match port.trim().parse::<u16>() {
            Ok(port) => config.connection.port = Some(port),
            Err(_) => warn!(value = %port, "ignoring invalid DEPLOYER_PORT"),
        }
    }

    // DEPLOYER_URL
    if let Some(url) = get("DEPLOYER_URL") {
        config.project.url = Some(url);
    }

    // DEPLOYER_TIMEOUT_SECS
    if let Some(secs) = get("DEPLOYER_TIMEOUT_SECS") {
        match secs.trim().parse::<u64>() {
            Ok(secs) => config.connection.timeout_secs = Some(secs),
            Err(_) => warn!(value = %secs, "ignoring invalid DEPLOYER_TIMEOUT_SECS"),
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

pub(crate) fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "connection",
        "host",
        "user",
        "port",
        "identity_file",
        "timeout_secs",
        "home",
        "project",
        "name",
        "repo",
        "url",
        "root_directory",
        "server_settings",
        "system_python",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
