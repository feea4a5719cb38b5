//! Where the config file lives, and seeding it with the template.

use std::fs;
use std::path::{Path, PathBuf};

use huddle_common::ConfigError;

use super::template::default_config_toml;

const APP_DIR: &str = "huddle";
const FILE_NAME: &str = "config.toml";

/// `<platform config dir>/huddle/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(FILE_NAME))
        .ok_or_else(|| ConfigError::ParseError("no per-user config directory on this platform".into()))
}

/// Write the commented default config to `path`, creating parent
/// directories as needed.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let io_error =
        |action: &str, e: std::io::Error| ConfigError::ParseError(format!("cannot {action} {}: {e}", path.display()));

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| io_error("create the directory for", e))?;
    }
    fs::write(path, default_config_toml()).map_err(|e| io_error("write", e))
}
