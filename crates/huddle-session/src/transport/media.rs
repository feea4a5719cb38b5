//! Media streaming client used for audio, camera and screen tracks.

use std::sync::Arc;

use async_trait::async_trait;
use huddle_common::ParticipantId;
use tokio::sync::mpsc;

use crate::error::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Audio,
    Video,
}

/// What produces a track's samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackSource {
    Microphone,
    Camera,
    Screen,
    Remote(MediaKind),
}

/// Camera encoder settings passed to track creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    pub width: u32,
    pub height: u32,
    pub frame_rate: u32,
    pub bitrate_min_kbps: u32,
    pub bitrate_max_kbps: u32,
}

impl Default for EncoderConfig {
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

/// Events pushed by the media client about remote participants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    Published {
        participant_id: ParticipantId,
        kind: MediaKind,
    },
    Unpublished {
        participant_id: ParticipantId,
        kind: MediaKind,
    },
}

/// A local or remote media track.
#[async_trait]
pub trait MediaTrack: Send + Sync + std::fmt::Debug {
    fn id(&self) -> &str;

    fn source(&self) -> TrackSource;

    async fn set_muted(&self, muted: bool) -> Result<(), TransportError>;

    /// Stop capture or playback.
    fn stop(&self);

    /// Release the underlying device.
    fn close(&self);

    /// Play into a render surface. Audio plays without one.
    fn play(&self, surface_id: Option<&str>) -> Result<(), TransportError>;
}

pub type TrackHandle = Arc<dyn MediaTrack>;

/// A media publish/subscribe client. One room is joined at a time.
#[async_trait]
pub trait MediaClient: Send + Sync {
    async fn join(
        &self,
        app_id: &str,
        room_id: &str,
        token: Option<&str>,
        self_id: &ParticipantId,
    ) -> Result<(), TransportError>;

    async fn leave(&self) -> Result<(), TransportError>;

    /// Acquire microphone and camera. Returns `(audio, video)`.
    async fn create_microphone_and_camera_tracks(
        &self,
        encoder: &EncoderConfig,
    ) -> Result<(TrackHandle, TrackHandle), TransportError>;

    /// Ask the user for a screen capture source.
    async fn create_screen_track(&self) -> Result<TrackHandle, TransportError>;

    async fn publish(&self, tracks: &[TrackHandle]) -> Result<(), TransportError>;

    async fn unpublish(&self, tracks: &[TrackHandle]) -> Result<(), TransportError>;

    /// Subscribe to a remote participant's published track.
    async fn subscribe_remote(
        &self,
        participant_id: &ParticipantId,
        kind: MediaKind,
    ) -> Result<TrackHandle, TransportError>;

    /// Start receiving media events. Dropping the receiver unsubscribes.
    async fn subscribe(&self) -> Result<mpsc::Receiver<MediaEvent>, TransportError>;
}
