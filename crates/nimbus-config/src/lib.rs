pub mod error;

pub use error::*;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_PATH_VAR: &str = "NIMBUS_CONFIG_PATH";
const APP_DIR: &str = "nimbus";

/// Defaults applied when the command line and environment leave a value unset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NimbusConfig {
    pub region: Option<String>,
    pub bucket: Option<String>,
}

impl NimbusConfig {
    /// Load the first configuration file found, or defaults when there is none
    pub fn load() -> Result<Self> {
        match find_config_file()? {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        // An empty file is a valid, empty configuration
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }
}

/// Nimbus configuration directory (`<config dir>/nimbus`), created if missing
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join(APP_DIR);

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// Locate the configuration file
///
/// Search order:
/// 1. `NIMBUS_CONFIG_PATH` (direct path)
/// 2. Current directory: `nimbus.yaml`, `.nimbus.yaml`
/// 3. `~/.config/nimbus/config.yaml` (global)
pub fn find_config_file() -> Result<Option<PathBuf>> {
    // 1. Direct path from the environment
    if let Ok(config_path) = std::env::var(CONFIG_PATH_VAR) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(Some(path));
        }
    }

    // 2. Current directory
    let current_dir = std::env::current_dir()?;
    for filename in ["nimbus.yaml", ".nimbus.yaml"] {
        let path = current_dir.join(filename);
        if path.exists() {
            return Ok(Some(path));
        }
    }

    // 3. Global configuration (~/.config/nimbus/config.yaml)
    if let Some(config_dir) = dirs::config_dir() {
        let global_config = config_dir.join(APP_DIR).join("config.yaml");
        if global_config.exists() {
            return Ok(Some(global_config));
        }
    }

    // Nothing found; callers fall back to defaults
    Ok(None)
}
