//! Reading `config.toml` into a [`HuddleConfig`].

use std::io;
use std::path::Path;

use huddle_common::ConfigError;
use tracing::{debug, info, warn};

use super::paths::{create_default_config, default_config_path};
use crate::schema::HuddleConfig;
use crate::validation;

/// Parse config text. Absent sections and fields take their defaults.
pub fn parse_config(text: &str) -> Result<HuddleConfig, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::ParseError(format!("invalid TOML: {e}")))
}

/// Read and parse the file at `path`.
///
/// Out-of-range values only produce a warning here and are returned as
/// parsed; [`crate::validation::validate`] is the strict check.
pub fn load_from_path(path: &Path) -> Result<HuddleConfig, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()))
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "cannot read {}: {e}",
                path.display()
            )))
        }
    };

    let config = parse_config(&text)?;
    if let Err(e) = validation::validate(&config) {
        warn!(path = %path.display(), "{e}; keeping parsed values");
    }
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Load the per-user config (`~/.config/huddle/config.toml` on Linux),
/// writing the commented template there first if no file exists yet.
pub fn load_default() -> Result<HuddleConfig, ConfigError> {
    let path = default_config_path()?;
    if !path.exists() {
        create_default_config(&path)?;
        info!(path = %path.display(), "wrote default config");
        return Ok(HuddleConfig::default());
    }
    load_from_path(&path)
}
