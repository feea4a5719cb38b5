//! Full configuration validation.
//!
//! Each section has its own validator; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod chat;
mod helpers;
mod media;


use crate::schema::HuddleConfig;
use huddle_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &HuddleConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    media::validate_encoder(&mut errors, config);
    chat::validate_chat(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
