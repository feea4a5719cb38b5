use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use huddle_common::ParticipantId;
use tokio::sync::mpsc;
use tracing::debug;

use super::{lock, Script, EVENT_BUFFER};
use crate::error::TransportError;
use crate::transport::{
    EncoderConfig, MediaClient, MediaEvent, MediaKind, MediaTrack, TrackHandle, TrackSource,
};

/// Observable state of a [`LoopbackTrack`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackState {
    pub muted: bool,
    pub stopped: bool,
    pub closed: bool,
    /// Set once `play` has been called; the inner value is the surface.
    pub playing: Option<Option<String>>,
}

/// In-memory [`MediaTrack`].
#[derive(Debug)]
pub struct LoopbackTrack {
    id: String,
    source: TrackSource,
    state: Mutex<TrackState>,
    mute_failure: Mutex<Option<TransportError>>,
}

impl LoopbackTrack {
    pub fn new(id: impl Into<String>, source: TrackSource) -> Self {
        Self {
            id: id.into(),
            source,
            state: Mutex::new(TrackState::default()),
            mute_failure: Mutex::new(None),
        }
    }

    pub fn handle(id: impl Into<String>, source: TrackSource) -> TrackHandle {
        Arc::new(Self::new(id, source))
    }

    pub fn state(&self) -> TrackState {
        lock(&self.state).clone()
    }

    /// Make later `set_muted` calls fail.
    pub fn fail_mute(&self, err: TransportError) {
        *lock(&self.mute_failure) = Some(err);
    }
}

#[async_trait]
impl MediaTrack for LoopbackTrack {
    fn id(&self) -> &str {
        &self.id
    }

    fn source(&self) -> TrackSource {
        self.source
    }

    async fn set_muted(&self, muted: bool) -> Result<(), TransportError> {
        if let Some(err) = lock(&self.mute_failure).clone() {
            return Err(err);
        }
        lock(&self.state).muted = muted;
        Ok(())
    }

    fn stop(&self) {
        let mut state = lock(&self.state);
        state.stopped = true;
        state.playing = None;
    }

    fn close(&self) {
        lock(&self.state).closed = true;
    }

    fn play(&self, surface_id: Option<&str>) -> Result<(), TransportError> {
        let mut state = lock(&self.state);
        if state.closed {
            return Err(TransportError::NoDevice(format!("track {} is closed", self.id)));
        }
        state.playing = Some(surface_id.map(str::to_string));
        Ok(())
    }
}

#[derive(Debug, Default)]
struct State {
    script: Script,
    room_id: Option<String>,
    next_track: u64,
    published: Vec<TrackHandle>,
    /// Every track handed out, local and remote, in creation order.
    tracks: Vec<Arc<LoopbackTrack>>,
    subscribers: Vec<mpsc::Sender<MediaEvent>>,
}

impl State {
    fn track(&mut self, prefix: &str, source: TrackSource) -> Arc<LoopbackTrack> {
        self.next_track += 1;
        let track = Arc::new(LoopbackTrack::new(
            format!("{prefix}-{}", self.next_track),
            source,
        ));
        self.tracks.push(track.clone());
        track
    }
}

/// In-memory [`MediaClient`].
#[derive(Debug, Default)]
pub struct LoopbackMedia {
    state: Mutex<State>,
}

impl LoopbackMedia {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later call to `op` fail with `err`.
    pub fn fail(&self, op: &'static str, err: TransportError) {
        lock(&self.state).script.failures.insert(op, err);
    }

    pub fn clear_failure(&self, op: &'static str) {
        lock(&self.state).script.failures.remove(op);
    }

    /// Operation names in call order.
    pub fn calls(&self) -> Vec<&'static str> {
        lock(&self.state).script.calls.clone()
    }

    pub fn room_id(&self) -> Option<String> {
        lock(&self.state).room_id.clone()
    }

    /// Sources of the currently published local tracks.
    pub fn published_sources(&self) -> Vec<TrackSource> {
        lock(&self.state)
            .published
            .iter()
            .map(|t| t.source())
            .collect()
    }

    /// Every track created so far.
    pub fn tracks(&self) -> Vec<Arc<LoopbackTrack>> {
        lock(&self.state).tracks.clone()
    }

    /// Most recently created track from `source`.
    pub fn last_track(&self, source: TrackSource) -> Option<Arc<LoopbackTrack>> {
        lock(&self.state)
            .tracks
            .iter()
            .rev()
            .find(|t| t.source == source)
            .cloned()
    }

    pub fn peer_published(&self, id: impl Into<ParticipantId>, kind: MediaKind) {
        self.emit(MediaEvent::Published {
            participant_id: id.into(),
            kind,
        });
    }

    pub fn peer_unpublished(&self, id: impl Into<ParticipantId>, kind: MediaKind) {
        self.emit(MediaEvent::Unpublished {
            participant_id: id.into(),
            kind,
        });
    }

    /// Deliver an event to every live subscriber. Returns how many got it.
    pub fn emit(&self, event: MediaEvent) -> usize {
        let mut state = lock(&self.state);
        state.subscribers.retain(|tx| !tx.is_closed());
        let delivered = state
            .subscribers
            .iter()
            .filter(|tx| tx.try_send(event.clone()).is_ok())
            .count();
        debug!(?event, delivered, "loopback media event");
        delivered
    }
}

#[async_trait]
impl MediaClient for LoopbackMedia {
    async fn join(
        &self,
        _app_id: &str,
        room_id: &str,
        _token: Option<&str>,
        _self_id: &ParticipantId,
    ) -> Result<(), TransportError> {
        let mut state = lock(&self.state);
        state.script.call("join")?;
        state.room_id = Some(room_id.to_string());
        Ok(())
    }

    async fn leave(&self) -> Result<(), TransportError> {
        let mut state = lock(&self.state);
        state.script.call("leave")?;
        state.room_id = None;
        state.published.clear();
        state.subscribers.clear();
        Ok(())
    }

    async fn create_microphone_and_camera_tracks(
        &self,
        _encoder: &EncoderConfig,
    ) -> Result<(TrackHandle, TrackHandle), TransportError> {
        let mut state = lock(&self.state);
        state.script.call("create_microphone_and_camera_tracks")?;
        let audio: TrackHandle = state.track("mic", TrackSource::Microphone);
        let video: TrackHandle = state.track("cam", TrackSource::Camera);
        Ok((audio, video))
    }

    async fn create_screen_track(&self) -> Result<TrackHandle, TransportError> {
        let mut state = lock(&self.state);
        state.script.call("create_screen_track")?;
        Ok(state.track("screen", TrackSource::Screen))
    }

    async fn publish(&self, tracks: &[TrackHandle]) -> Result<(), TransportError> {
        let mut state = lock(&self.state);
        state.script.call("publish")?;
        if state.room_id.is_none() {
            return Err(TransportError::NotConnected);
        }
        for track in tracks {
            if !state.published.iter().any(|p| p.id() == track.id()) {
                state.published.push(track.clone());
            }
        }
        Ok(())
    }

    async fn unpublish(&self, tracks: &[TrackHandle]) -> Result<(), TransportError> {
        let mut state = lock(&self.state);
        state.script.call("unpublish")?;
        state
            .published
            .retain(|p| !tracks.iter().any(|t| t.id() == p.id()));
        Ok(())
    }

    async fn subscribe_remote(
        &self,
        participant_id: &ParticipantId,
        kind: MediaKind,
    ) -> Result<TrackHandle, TransportError> {
        let mut state = lock(&self.state);
        state.script.call("subscribe_remote")?;
        let prefix = format!("remote-{participant_id}");
        Ok(state.track(&prefix, TrackSource::Remote(kind)))
    }

    async fn subscribe(&self) -> Result<mpsc::Receiver<MediaEvent>, TransportError> {
        let mut state = lock(&self.state);
        state.script.call("subscribe")?;
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        state.subscribers.push(tx);
        Ok(rx)
    }
}
