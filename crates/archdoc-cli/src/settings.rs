//! Locating and loading the deployment config.

use std::path::{Path, PathBuf};

use archdoc_session::{ConfigError, DeploymentConfig};
use directories::ProjectDirs;
use tracing::debug;

const CONFIG_FILE: &str = "config.toml";

/// `<platform config dir>/archdoc/config.toml`, when a home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "archdoc").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Load the explicit file, else the default file if present, else defaults.
///
/// Endpoint environment overrides are applied last.
pub fn load_config(explicit: Option<&Path>) -> Result<DeploymentConfig, ConfigError> {
    let config = match explicit {
        Some(path) => DeploymentConfig::from_file(path)?,
        None => match default_config_path() {
            Some(path) => DeploymentConfig::from_optional_file(&path)?,
            None => {
                debug!("no config directory; using defaults");
                DeploymentConfig::default()
            }
        },
    };
    Ok(config.with_env_overrides())
}
