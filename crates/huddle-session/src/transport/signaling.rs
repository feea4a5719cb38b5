//! Realtime messaging channel used for membership and chat.

use async_trait::async_trait;
use huddle_common::ParticipantId;
use tokio::sync::mpsc;

use crate::error::TransportError;

/// Events pushed by the signaling channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalingEvent {
    ParticipantJoined(ParticipantId),
    ParticipantLeft(ParticipantId),
    /// Raw text broadcast by a peer.
    Message(String),
}

/// A realtime messaging client. One channel (room) is joined at a time.
#[async_trait]
pub trait SignalingChannel: Send + Sync {
    async fn login(&self, self_id: &ParticipantId) -> Result<(), TransportError>;

    async fn logout(&self) -> Result<(), TransportError>;

    /// Publish the local participant's attributes (display name).
    async fn set_self_attributes(&self, display_name: &str) -> Result<(), TransportError>;

    /// Join the channel named after the room.
    async fn join(&self, room_id: &str) -> Result<(), TransportError>;

    async fn leave(&self) -> Result<(), TransportError>;

    /// Ids currently in the channel, including the local participant.
    async fn members(&self) -> Result<Vec<ParticipantId>, TransportError>;

    /// Look up the `name` attribute of a participant.
    async fn display_name(&self, id: &ParticipantId) -> Result<String, TransportError>;

    async fn send_message(&self, text: String) -> Result<(), TransportError>;

    /// Start receiving channel events. Dropping the receiver unsubscribes.
    async fn subscribe(&self) -> Result<mpsc::Receiver<SignalingEvent>, TransportError>;
}
