//! Configuration schema types for Huddle.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod chat;
mod media;
mod system;

pub use chat::*;
pub use media::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Huddle.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct HuddleConfig {
    pub media: MediaConfig,
    pub chat: ChatConfig,
    pub logging: LoggingConfig,
}
