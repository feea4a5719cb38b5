//! Room state machine.
//!
//! [`Room`] owns the roster, chat log, tile layout and local media state of
//! one joined room. It consumes [`RoomEvent`]s and returns the
//! [`RoomAction`]s the coordinator must perform; it never awaits or touches a
//! collaborator itself, so every reconciliation rule can be exercised
//! synchronously.

use huddle_common::ParticipantId;
use tracing::{debug, warn};

use crate::chat::{ChatEntry, ChatLog};
use crate::local_media::LocalMedia;
use crate::protocol::ChannelMessage;
use crate::roster::{Arrival, Departure, Participant, Roster};
use crate::tiles::TileLayout;
use crate::transport::MediaKind;

/// Inbound input to the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    ParticipantJoined(ParticipantId),
    ParticipantLeft(ParticipantId),
    /// Channel members present when the room was joined.
    RosterSnapshot(Vec<ParticipantId>),
    /// A display-name lookup finished. `None` when the lookup failed.
    NameResolved {
        id: ParticipantId,
        name: Option<String>,
    },
    /// Raw channel text from a peer.
    MessageReceived(String),
    MediaPublished {
        participant_id: ParticipantId,
        kind: MediaKind,
    },
    MediaUnpublished {
        participant_id: ParticipantId,
        kind: MediaKind,
    },
}

/// Side effects requested by the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomAction {
    /// Look up the participant's display name and report it back as
    /// [`RoomEvent::NameResolved`].
    ResolveName(ParticipantId),
    /// Subscribe to and play a remote track.
    SubscribeMedia {
        participant_id: ParticipantId,
        kind: MediaKind,
    },
}

#[derive(Debug)]
pub struct Room {
    room_id: String,
    self_id: ParticipantId,
    self_name: String,
    roster: Roster,
    chat: ChatLog,
    tiles: TileLayout,
    local_media: LocalMedia,
}

impl Room {
    /// Create the room with the local participant already in the roster.
    pub fn new(
        room_id: impl Into<String>,
        self_id: ParticipantId,
        self_name: impl Into<String>,
        system_author: impl Into<String>,
    ) -> Self {
        let self_name = self_name.into();
        let mut roster = Roster::new();
        roster.insert(Participant {
            id: self_id.clone(),
            display_name: self_name.clone(),
        });
        Self {
            room_id: room_id.into(),
            self_id,
            self_name,
            roster,
            chat: ChatLog::new(system_author),
            tiles: TileLayout::new(),
            local_media: LocalMedia::new(),
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: RoomEvent) -> Vec<RoomAction> {
        match event {
            RoomEvent::ParticipantJoined(id) => self.expect(id, Arrival::Announced),
            RoomEvent::RosterSnapshot(ids) => ids
                .into_iter()
                .flat_map(|id| self.expect(id, Arrival::Silent))
                .collect(),
            RoomEvent::NameResolved { id, name } => {
                self.on_name_resolved(id, name);
                vec![]
            }
            RoomEvent::ParticipantLeft(id) => {
                self.on_participant_left(&id);
                vec![]
            }
            RoomEvent::MessageReceived(raw) => {
                self.on_message(&raw);
                vec![]
            }
            RoomEvent::MediaPublished {
                participant_id,
                kind,
            } => self.on_media_published(participant_id, kind),
            RoomEvent::MediaUnpublished {
                participant_id,
                kind,
            } => {
                self.on_media_unpublished(&participant_id, kind);
                vec![]
            }
        }
    }

    fn expect(&mut self, id: ParticipantId, arrival: Arrival) -> Vec<RoomAction> {
        if id == self.self_id || !self.roster.expect(id.clone(), arrival) {
            debug!(participant_id = %id, "join needs no lookup");
            return vec![];
        }
        vec![RoomAction::ResolveName(id)]
    }

    fn on_name_resolved(&mut self, id: ParticipantId, name: Option<String>) {
        let name = name.unwrap_or_else(|| id.to_string());
        match self.roster.resolve(&id, name) {
            Some((participant, Arrival::Announced)) => {
                self.chat
                    .append_system(format!("{} joined", participant.display_name));
            }
            Some((_, Arrival::Silent)) => {}
            None => debug!(participant_id = %id, "dropping stale name lookup"),
        }
    }

    fn on_participant_left(&mut self, id: &ParticipantId) {
        if id == &self.self_id {
            return;
        }
        match self.roster.remove(id) {
            Departure::Removed(participant) => {
                self.chat.append_system(format!(
                    "{} has left the room.",
                    participant.display_name
                ));
            }
            Departure::Cancelled => debug!(participant_id = %id, "left before name lookup"),
            Departure::Unknown => debug!(participant_id = %id, "left before joining"),
        }
        self.tiles.remove(id);
    }

    fn on_message(&mut self, raw: &str) {
        match ChannelMessage::decode(raw) {
            ChannelMessage::Chat { text, display_name } => {
                self.chat.append_remote(display_name, text);
            }
            ChannelMessage::UserLeft { uid } => {
                if uid != self.self_id && self.tiles.remove(&uid) {
                    debug!(participant_id = %uid, "peer stopped streaming");
                }
            }
            ChannelMessage::Unknown { kind } => debug!(%kind, "ignoring unknown message type"),
            ChannelMessage::Malformed(e) => warn!(error = %e, "dropping malformed channel message"),
        }
    }

    fn on_media_published(&mut self, participant_id: ParticipantId, kind: MediaKind) -> Vec<RoomAction> {
        if participant_id == self.self_id {
            return vec![];
        }
        if kind == MediaKind::Video && !self.tiles.insert(participant_id.clone()) {
            debug!(participant_id = %participant_id, "duplicate video publish");
            return vec![];
        }
        vec![RoomAction::SubscribeMedia {
            participant_id,
            kind,
        }]
    }

    fn on_media_unpublished(&mut self, participant_id: &ParticipantId, kind: MediaKind) {
        if participant_id == &self.self_id || kind == MediaKind::Audio {
            return;
        }
        self.tiles.remove(participant_id);
    }

    // -------------------------------------------------------------------------
    // Local participant
    // -------------------------------------------------------------------------

    pub(crate) fn append_welcome(&mut self) {
        let text = format!("Welcome to the room {}!", self.self_name);
        self.chat.append_system(text);
    }

    /// Echo a local chat message.
    pub(crate) fn append_local(&mut self, text: &str) -> ChatEntry {
        self.chat.append_local(&self.self_name, text).clone()
    }

    pub(crate) fn show_self_tile(&mut self) -> bool {
        self.tiles.insert(self.self_id.clone())
    }

    pub(crate) fn hide_self_tile(&mut self) -> bool {
        self.tiles.remove(&self.self_id)
    }

    pub(crate) fn focus(&mut self, target: Option<&ParticipantId>) -> bool {
        self.tiles.set_focus(target)
    }

    pub(crate) fn clear_self_focus(&mut self) -> bool {
        self.tiles.clear_focus_of(&self.self_id)
    }

    pub(crate) fn local_media_mut(&mut self) -> &mut LocalMedia {
        &mut self.local_media
    }

    // -------------------------------------------------------------------------
    // Views
    // -------------------------------------------------------------------------

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn self_id(&self) -> &ParticipantId {
        &self.self_id
    }

    pub fn self_name(&self) -> &str {
        &self.self_name
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn chat_log(&self) -> &ChatLog {
        &self.chat
    }

    pub fn tiles(&self) -> &TileLayout {
        &self.tiles
    }

    pub fn local_media(&self) -> &LocalMedia {
        &self.local_media
    }
}
