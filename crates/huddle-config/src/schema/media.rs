//! Media client configuration types.

use serde::{Deserialize, Serialize};

/// Camera encoder settings requested when the local stream starts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EncoderSchemaConfig {
    pub width: u32,
    pub height: u32,
    pub frame_rate: u32,
    pub bitrate_min_kbps: u32,
    pub bitrate_max_kbps: u32,
}

impl Default for EncoderSchemaConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            frame_rate: 30,
            bitrate_min_kbps: 600,
            bitrate_max_kbps: 1500,
        }
    }
}

/// Media streaming client configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MediaConfig {
    /// Application id issued by the media provider.
    pub app_id: String,
    /// Optional join token. `None` joins without a token.
    pub token: Option<String>,
    pub encoder: EncoderSchemaConfig,
}
