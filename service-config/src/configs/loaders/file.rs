use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::ConfigError;

/// Candidate names for the local config file, in lookup order.
const CONFIG_FILE_NAMES: [&str; 2] = ["conf.toml", "conf"];

/// Finds the local config file inside `dir`.
pub fn find_config_file(dir: &Path) -> Result<PathBuf, ConfigError> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
        .ok_or_else(|| {
            ConfigError::ConfigFile(format!(
                "No config file named 'conf' found in '{}'",
                dir.display()
            ))
        })
}

pub fn load(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|e| {
        ConfigError::ConfigFile(format!("Failed to read file '{}': {}", path.display(), e))
    })
}
