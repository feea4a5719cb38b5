//! Chat configuration types.

use serde::{Deserialize, Serialize};

/// Chat log presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Author shown on system notices (welcome, joined, left).
    pub system_author: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            system_author: "🤖".into(),
        }
    }
}
