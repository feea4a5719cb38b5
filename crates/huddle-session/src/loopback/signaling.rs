use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use huddle_common::ParticipantId;
use tokio::sync::mpsc;
use tracing::debug;

use super::{lock, Script, EVENT_BUFFER};
use crate::error::TransportError;
use crate::transport::{SignalingChannel, SignalingEvent};

#[derive(Debug, Default)]
struct State {
    script: Script,
    self_id: Option<ParticipantId>,
    room_id: Option<String>,
    /// Channel members other than the local participant.
    peers: Vec<ParticipantId>,
    names: HashMap<ParticipantId, String>,
    sent: Vec<String>,
    subscribers: Vec<mpsc::Sender<SignalingEvent>>,
}

/// In-memory [`SignalingChannel`].
#[derive(Debug, Default)]
pub struct LoopbackSignaling {
    state: Mutex<State>,
}

impl LoopbackSignaling {
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

    /// Texts broadcast through `send_message`.
    pub fn sent_messages(&self) -> Vec<String> {
        lock(&self.state).sent.clone()
    }

    pub fn room_id(&self) -> Option<String> {
        lock(&self.state).room_id.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        lock(&self.state).self_id.is_some()
    }

    /// Register a peer that is already in the channel, without an event.
    pub fn add_member(&self, id: impl Into<ParticipantId>, name: impl Into<String>) {
        let id = id.into();
        let mut state = lock(&self.state);
        state.names.insert(id.clone(), name.into());
        if !state.peers.contains(&id) {
            state.peers.push(id);
        }
    }

    /// A peer enters the channel.
    pub fn peer_joined(&self, id: impl Into<ParticipantId>, name: impl Into<String>) {
        let id = id.into();
        self.add_member(id.clone(), name);
        self.emit(SignalingEvent::ParticipantJoined(id));
    }

    /// A peer leaves the channel.
    pub fn peer_left(&self, id: impl Into<ParticipantId>) {
        let id = id.into();
        lock(&self.state).peers.retain(|p| p != &id);
        self.emit(SignalingEvent::ParticipantLeft(id));
    }

    /// A peer broadcasts `text`.
    pub fn peer_message(&self, text: impl Into<String>) {
        self.emit(SignalingEvent::Message(text.into()));
    }

    /// Deliver an event to every live subscriber. Returns how many got it.
    pub fn emit(&self, event: SignalingEvent) -> usize {
        let mut state = lock(&self.state);
        state.subscribers.retain(|tx| !tx.is_closed());
        let delivered = state
            .subscribers
            .iter()
            .filter(|tx| tx.try_send(event.clone()).is_ok())
            .count();
        debug!(?event, delivered, "loopback signaling event");
        delivered
    }
}

#[async_trait]
impl SignalingChannel for LoopbackSignaling {
    async fn login(&self, self_id: &ParticipantId) -> Result<(), TransportError> {
        let mut state = lock(&self.state);
        state.script.call("login")?;
        state.self_id = Some(self_id.clone());
        Ok(())
    }

    async fn logout(&self) -> Result<(), TransportError> {
        let mut state = lock(&self.state);
        state.script.call("logout")?;
        state.self_id = None;
        Ok(())
    }

    async fn set_self_attributes(&self, display_name: &str) -> Result<(), TransportError> {
        let mut state = lock(&self.state);
        state.script.call("set_self_attributes")?;
        let self_id = state.self_id.clone().ok_or(TransportError::NotConnected)?;
        state.names.insert(self_id, display_name.to_string());
        Ok(())
    }

    async fn join(&self, room_id: &str) -> Result<(), TransportError> {
        let mut state = lock(&self.state);
        state.script.call("join")?;
        if state.self_id.is_none() {
            return Err(TransportError::NotConnected);
        }
        state.room_id = Some(room_id.to_string());
        Ok(())
    }

    async fn leave(&self) -> Result<(), TransportError> {
        let mut state = lock(&self.state);
        state.script.call("leave")?;
        state.room_id = None;
        state.subscribers.clear();
        Ok(())
    }

    async fn members(&self) -> Result<Vec<ParticipantId>, TransportError> {
        let mut state = lock(&self.state);
        state.script.call("members")?;
        if state.room_id.is_none() {
            return Err(TransportError::NotConnected);
        }
        Ok(state.self_id.iter().chain(&state.peers).cloned().collect())
    }

    async fn display_name(&self, id: &ParticipantId) -> Result<String, TransportError> {
        let mut state = lock(&self.state);
        state.script.call("display_name")?;
        state
            .names
            .get(id)
            .cloned()
            .ok_or_else(|| TransportError::Rejected(format!("no attributes for {id}")))
    }

    async fn send_message(&self, text: String) -> Result<(), TransportError> {
        let mut state = lock(&self.state);
        state.script.call("send_message")?;
        if state.room_id.is_none() {
            return Err(TransportError::NotConnected);
        }
        state.sent.push(text);
        Ok(())
    }

    async fn subscribe(&self) -> Result<mpsc::Receiver<SignalingEvent>, TransportError> {
        let mut state = lock(&self.state);
        state.script.call("subscribe")?;
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        state.subscribers.push(tx);
        Ok(rx)
    }
}
