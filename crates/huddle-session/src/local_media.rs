//! The local participant's own tracks and publish flags.
//!
//! While streaming, exactly one video source is published: the camera
//! ([`ShareMode::CameraActive`]) or the screen ([`ShareMode::ScreenActive`]).
//! The microphone keeps publishing across both modes.

use crate::transport::TrackHandle;

/// Snapshot of the local publish status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalMediaState {
    pub joined_stream: bool,
    pub camera_muted: bool,
    pub mic_muted: bool,
    pub sharing_screen: bool,
}

/// Which video source is published while streaming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareMode {
    CameraActive,
    ScreenActive,
}

#[derive(Debug, Default)]
pub struct LocalMedia {
    state: LocalMediaState,
    microphone: Option<TrackHandle>,
    camera: Option<TrackHandle>,
    screen: Option<TrackHandle>,
    camera_published: bool,
}

impl LocalMedia {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LocalMediaState {
        self.state
    }

    pub fn is_streaming(&self) -> bool {
        self.state.joined_stream
    }

    pub fn mode(&self) -> ShareMode {
        if self.state.sharing_screen {
            ShareMode::ScreenActive
        } else {
            ShareMode::CameraActive
        }
    }

    /// Record freshly published microphone and camera tracks.
    pub(crate) fn start(&mut self, microphone: TrackHandle, camera: TrackHandle) {
        self.microphone = Some(microphone);
        self.camera = Some(camera);
        self.camera_published = true;
        self.state = LocalMediaState {
            joined_stream: true,
            ..LocalMediaState::default()
        };
    }

    /// Take every held track and reset to the not-streaming state.
    pub(crate) fn take_all(&mut self) -> Vec<TrackHandle> {
        let tracks = [self.microphone.take(), self.camera.take(), self.screen.take()]
            .into_iter()
            .flatten()
            .collect();
        self.camera_published = false;
        self.state = LocalMediaState::default();
        tracks
    }

    /// Tracks currently published.
    pub fn published_tracks(&self) -> Vec<TrackHandle> {
        let mut tracks = Vec::with_capacity(2);
        if let Some(mic) = &self.microphone {
            tracks.push(mic.clone());
        }
        if self.camera_published {
            if let Some(camera) = &self.camera {
                tracks.push(camera.clone());
            }
        }
        if let Some(screen) = &self.screen {
            tracks.push(screen.clone());
        }
        tracks
    }

    pub fn microphone(&self) -> Option<&TrackHandle> {
        self.microphone.as_ref()
    }

    pub fn camera(&self) -> Option<&TrackHandle> {
        self.camera.as_ref()
    }

    pub fn screen(&self) -> Option<&TrackHandle> {
        self.screen.as_ref()
    }

    pub fn camera_published(&self) -> bool {
        self.camera_published
    }

    pub(crate) fn set_camera_muted(&mut self, muted: bool) {
        self.state.camera_muted = muted;
    }

    pub(crate) fn set_mic_muted(&mut self, muted: bool) {
        self.state.mic_muted = muted;
    }

    pub(crate) fn set_camera_published(&mut self, published: bool) {
        self.camera_published = published;
    }

    /// Switch to screen mode with a published screen track. The camera must
    /// already be unpublished.
    pub(crate) fn begin_screen(&mut self, screen: TrackHandle) {
        debug_assert!(!self.camera_published, "camera still published");
        self.screen = Some(screen);
        self.state.sharing_screen = true;
    }

    /// Leave screen mode, handing back the screen track to release.
    pub(crate) fn end_screen(&mut self) -> Option<TrackHandle> {
        self.state.sharing_screen = false;
        self.screen.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loopback::LoopbackTrack;
    use crate::transport::{MediaTrack, TrackSource};

    fn sources(media: &LocalMedia) -> Vec<TrackSource> {
        media.published_tracks().iter().map(|t| t.source()).collect()
    }

    #[test]
    fn starts_idle() {
        let media = LocalMedia::new();
        assert_eq!(media.state(), LocalMediaState::default());
        assert!(!media.is_streaming());
        assert_eq!(media.mode(), ShareMode::CameraActive);
        assert!(media.published_tracks().is_empty());
    }

    #[test]
    fn start_publishes_mic_and_camera() {
        let mut media = LocalMedia::new();
        media.start(
            LoopbackTrack::handle("mic", TrackSource::Microphone),
            LoopbackTrack::handle("cam", TrackSource::Camera),
        );
        assert!(media.state().joined_stream);
        assert_eq!(
            sources(&media),
            vec![TrackSource::Microphone, TrackSource::Camera]
        );
    }

    #[test]
    fn screen_mode_replaces_camera() {
        let mut media = LocalMedia::new();
        media.start(
            LoopbackTrack::handle("mic", TrackSource::Microphone),
            LoopbackTrack::handle("cam", TrackSource::Camera),
        );
        media.set_camera_published(false);
        media.begin_screen(LoopbackTrack::handle("scr", TrackSource::Screen));

        assert_eq!(media.mode(), ShareMode::ScreenActive);
        assert_eq!(
            sources(&media),
            vec![TrackSource::Microphone, TrackSource::Screen]
        );

        let screen = media.end_screen();
        assert!(screen.is_some());
        media.set_camera_published(true);
        assert_eq!(media.mode(), ShareMode::CameraActive);
        assert_eq!(
            sources(&media),
            vec![TrackSource::Microphone, TrackSource::Camera]
        );
    }

    #[test]
    fn take_all_resets_state() {
        let mut media = LocalMedia::new();
        media.start(
            LoopbackTrack::handle("mic", TrackSource::Microphone),
            LoopbackTrack::handle("cam", TrackSource::Camera),
        );
        media.set_mic_muted(true);
        let tracks = media.take_all();
        assert_eq!(tracks.len(), 2);
        assert_eq!(media.state(), LocalMediaState::default());
        assert!(media.camera().is_none());
    }
}
