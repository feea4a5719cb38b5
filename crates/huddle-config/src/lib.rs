//! Huddle configuration system.
//!
//! TOML-based configuration for the media client, chat presentation and
//! logging. All sections use defaults so partial configs work out of the box.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{HuddleConfig, CONFIG_SCHEMA_VERSION};

use huddle_common::ConfigError;
use std::path::Path;

/// Load config from an explicit path, or from the platform default path
/// (creating a default file there if none exists).
///
/// Only unreadable or unparsable files are errors. Out-of-range values are
/// logged and kept; run [`validation::validate`] for a strict check.
pub fn load_config(path: Option<&Path>) -> Result<HuddleConfig, ConfigError> {
    match path {
        Some(path) => toml_loader::load_from_path(path),
        None => toml_loader::load_default(),
    }
}

/// Pretty JSON view of the effective config, for logs and diagnostics.
pub fn config_to_json(config: &HuddleConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
