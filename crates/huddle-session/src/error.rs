//! Error types for the session core.

use std::fmt;

use crate::coordinator::Phase;

/// Failure reported by a signaling or media collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("not connected")]
    NotConnected,

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("no device: {0}")]
    NoDevice(String),

    #[error("cancelled by user")]
    Cancelled,
}

/// Why an inbound channel payload could not be understood.
///
/// Never surfaced to callers: payloads come from untrusted peers, so these
/// are logged and dropped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("payload has no string \"type\" field")]
    MissingType,

    #[error("invalid fields for {kind}: {reason}")]
    InvalidFields { kind: String, reason: String },
}

/// Step of the join sequence that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinStage {
    Login,
    SetAttributes,
    JoinChannel,
    SubscribeSignaling,
    FetchRoster,
    JoinMedia,
    SubscribeMedia,
}

impl fmt::Display for JoinStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Login => "login",
            Self::SetAttributes => "set attributes",
            Self::JoinChannel => "channel join",
            Self::SubscribeSignaling => "signaling subscribe",
            Self::FetchRoster => "roster fetch",
            Self::JoinMedia => "media join",
            Self::SubscribeMedia => "media subscribe",
        };
        f.write_str(name)
    }
}

/// Step of the leave sequence that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveStep {
    UnpublishMedia,
    LeaveMedia,
    LeaveChannel,
    Logout,
}

impl fmt::Display for LeaveStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UnpublishMedia => "unpublish media",
            Self::LeaveMedia => "media leave",
            Self::LeaveChannel => "channel leave",
            Self::Logout => "logout",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by [`crate::SessionCoordinator`] commands.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("join failed during {stage}: {source}")]
    JoinFailed {
        stage: JoinStage,
        source: TransportError,
    },

    #[error("{command} is not allowed while {phase}")]
    InvalidRoomState { command: &'static str, phase: Phase },

    #[error("device unavailable: {0}")]
    DeviceUnavailable(#[source] TransportError),

    #[error("{0} requires an active stream")]
    NotStreaming(&'static str),

    #[error("leave incomplete, {step} failed: {source}")]
    LeaveFailed {
        step: LeaveStep,
        source: TransportError,
    },

    #[error("media {operation} failed: {source}")]
    Media {
        operation: &'static str,
        source: TransportError,
    },

    /// A source swap failed and could not be undone, so the local stream was
    /// stopped. `joined_stream` is false afterwards.
    #[error("media {operation} failed and the stream was stopped: {source}")]
    StreamEnded {
        operation: &'static str,
        source: TransportError,
    },
}

impl SessionError {
    pub(crate) fn media(operation: &'static str, source: TransportError) -> Self {
        Self::Media { operation, source }
    }
}
