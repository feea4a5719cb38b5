//! Session coordinator: joins a room, pumps the two collaborator event
//! streams into the [`Room`], and runs the caller's commands.
//!
//! Every method takes `&mut self`, so handlers run to completion one at a
//! time. Inbound events queue in their channels while a handler awaits a
//! collaborator and are picked up by the next [`SessionCoordinator::next_event`]
//! or [`SessionCoordinator::process_ready`] call.

mod commands;
mod events;
mod lifecycle;
mod types;


use std::sync::Arc;

use huddle_common::ParticipantId;

use crate::chat::ChatLog;
use crate::local_media::LocalMediaState;
use crate::room::Room;
use crate::roster::Roster;
use crate::tiles::TileLayout;
use crate::transport::{MediaClient, SignalingChannel};

use events::Inbound;

pub use types::{Phase, SessionConfig, SessionState};

pub struct SessionCoordinator {
    signaling: Arc<dyn SignalingChannel>,
    media: Arc<dyn MediaClient>,
    config: SessionConfig,
    self_id: ParticipantId,
    phase: Phase,
    /// Present from a successful join until the leave completes.
    room: Option<Room>,
    /// Event subscriptions plus in-flight name lookups.
    inbound: Option<Inbound>,
}

impl SessionCoordinator {
    /// Create an idle coordinator. `self_id` should be stable for the
    /// lifetime of the caller's session (see [`ParticipantId::generate`]).
    pub fn new(
        signaling: Arc<dyn SignalingChannel>,
        media: Arc<dyn MediaClient>,
        config: SessionConfig,
        self_id: ParticipantId,
    ) -> Self {
        Self {
            signaling,
            media,
            config,
            self_id,
            phase: Phase::Idle,
            room: None,
            inbound: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn self_id(&self) -> &ParticipantId {
        &self.self_id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            phase: self.phase,
            room_id: self.room.as_ref().map(|r| r.room_id().to_string()),
            self_id: self.self_id.clone(),
            self_display_name: self.room.as_ref().map(|r| r.self_name().to_string()),
        }
    }

    pub fn room(&self) -> Option<&Room> {
        self.room.as_ref()
    }

    pub fn roster(&self) -> Option<&Roster> {
        self.room.as_ref().map(Room::roster)
    }

    pub fn chat_log(&self) -> Option<&ChatLog> {
        self.room.as_ref().map(Room::chat_log)
    }

    pub fn tiles(&self) -> Option<&TileLayout> {
        self.room.as_ref().map(Room::tiles)
    }

    /// Local publish flags; all false outside a room.
    pub fn local_media(&self) -> LocalMediaState {
        self.room
            .as_ref()
            .map(|r| r.local_media().state())
            .unwrap_or_default()
    }
}
