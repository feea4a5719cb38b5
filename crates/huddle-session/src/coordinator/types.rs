//! Lifecycle phase, state snapshot and runtime configuration.

use std::fmt;

use huddle_common::ParticipantId;

use crate::transport::EncoderConfig;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Coordinator lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Joining,
    Joined,
    Leaving,
    /// Terminal for the room; `reset` returns to `Idle`.
    Left,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Joining => "joining",
            Self::Joined => "joined",
            Self::Leaving => "leaving",
            Self::Left => "left",
        };
        f.write_str(name)
    }
}

/// Snapshot of the coordinator's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub phase: Phase,
    pub room_id: Option<String>,
    pub self_id: ParticipantId,
    pub self_display_name: Option<String>,
}

/// Runtime settings handed to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Media service application id.
    pub app_id: String,
    /// Media join token; `None` for token-less projects.
    pub token: Option<String>,
    pub encoder: EncoderConfig,
    /// Author shown on system notices.
    pub system_author: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            token: None,
            encoder: EncoderConfig::default(),
            system_author: "🤖".to_string(),
        }
    }
}
