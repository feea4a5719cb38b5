//! Join, leave and teardown.

use huddle_common::ParticipantId;
use tracing::{info, warn};

use super::events::Inbound;
use super::{Phase, SessionCoordinator};
use crate::error::{JoinStage, LeaveStep, SessionError, TransportError};
use crate::room::{Room, RoomEvent};

/// Resources taken during a join attempt, released if it fails.
#[derive(Debug, Default)]
struct Acquired {
    logged_in: bool,
    channel_joined: bool,
    media_joined: bool,
}

fn stage(stage: JoinStage) -> impl FnOnce(TransportError) -> SessionError {
    move |source| SessionError::JoinFailed { stage, source }
}

/// Keep the first leave failure; log every one.
fn note(first: &mut Option<SessionError>, step: LeaveStep, result: Result<(), TransportError>) {
    if let Err(source) = result {
        warn!(%step, error = %source, "leave step failed");
        first.get_or_insert(SessionError::LeaveFailed { step, source });
    }
}

impl SessionCoordinator {
    /// Join `room_id` as `display_name`.
    ///
    /// Only valid while `Idle`. On failure everything acquired so far is
    /// released and the coordinator is `Idle` again.
    pub async fn join(&mut self, room_id: &str, display_name: &str) -> Result<(), SessionError> {
        if self.phase != Phase::Idle {
            return Err(SessionError::InvalidRoomState {
                command: "join",
                phase: self.phase,
            });
        }
        self.phase = Phase::Joining;
        info!(room_id, participant_id = %self.self_id, "joining room");

        let mut acquired = Acquired::default();
        let (inbound, members) = match self.connect(room_id, display_name, &mut acquired).await {
            Ok(joined) => joined,
            Err(e) => {
                warn!(room_id, error = %e, "join failed");
                self.release(&acquired).await;
                self.phase = Phase::Idle;
                return Err(e);
            }
        };

        self.room = Some(Room::new(
            room_id,
            self.self_id.clone(),
            display_name,
            self.config.system_author.clone(),
        ));
        self.inbound = Some(inbound);
        self.phase = Phase::Joined;
        self.dispatch(RoomEvent::RosterSnapshot(members)).await;
        if let Some(room) = self.room.as_mut() {
            room.append_welcome();
        }
        info!(room_id, "joined room");
        Ok(())
    }

    async fn connect(
        &self,
        room_id: &str,
        display_name: &str,
        acquired: &mut Acquired,
    ) -> Result<(Inbound, Vec<ParticipantId>), SessionError> {
        self.signaling
            .login(&self.self_id)
            .await
            .map_err(stage(JoinStage::Login))?;
        acquired.logged_in = true;

        self.signaling
            .set_self_attributes(display_name)
            .await
            .map_err(stage(JoinStage::SetAttributes))?;

        self.signaling
            .join(room_id)
            .await
            .map_err(stage(JoinStage::JoinChannel))?;
        acquired.channel_joined = true;

        let signaling_rx = self
            .signaling
            .subscribe()
            .await
            .map_err(stage(JoinStage::SubscribeSignaling))?;

        let members = self
            .signaling
            .members()
            .await
            .map_err(stage(JoinStage::FetchRoster))?;

        self.media
            .join(
                &self.config.app_id,
                room_id,
                self.config.token.as_deref(),
                &self.self_id,
            )
            .await
            .map_err(stage(JoinStage::JoinMedia))?;
        acquired.media_joined = true;

        let media_rx = self
            .media
            .subscribe()
            .await
            .map_err(stage(JoinStage::SubscribeMedia))?;

        Ok((Inbound::new(signaling_rx, media_rx), members))
    }

    /// Undo a partial join, newest resource first.
    async fn release(&self, acquired: &Acquired) {
        if acquired.media_joined {
            if let Err(e) = self.media.leave().await {
                warn!(error = %e, "media leave during join rollback failed");
            }
        }
        if acquired.channel_joined {
            if let Err(e) = self.signaling.leave().await {
                warn!(error = %e, "channel leave during join rollback failed");
            }
        }
        if acquired.logged_in {
            if let Err(e) = self.signaling.logout().await {
                warn!(error = %e, "logout during join rollback failed");
            }
        }
    }

    /// Leave the room.
    ///
    /// A no-op unless `Joined`; rejected while a join is in flight. Every
    /// teardown step is attempted and the first failure is returned.
    pub async fn leave(&mut self) -> Result<(), SessionError> {
        match self.phase {
            Phase::Joined => {}
            Phase::Joining => {
                return Err(SessionError::InvalidRoomState {
                    command: "leave",
                    phase: self.phase,
                })
            }
            Phase::Idle | Phase::Leaving | Phase::Left => return Ok(()),
        }
        self.phase = Phase::Leaving;
        self.inbound = None;
        info!(participant_id = %self.self_id, "leaving room");

        let mut first = None;

        let tracks = match self.room.as_mut() {
            Some(room) => {
                let published = room.local_media().published_tracks();
                let tracks = room.local_media_mut().take_all();
                if !published.is_empty() {
                    let result = self.media.unpublish(&published).await;
                    note(&mut first, LeaveStep::UnpublishMedia, result);
                }
                tracks
            }
            None => Vec::new(),
        };
        for track in &tracks {
            track.stop();
            track.close();
        }

        note(&mut first, LeaveStep::LeaveMedia, self.media.leave().await);
        note(&mut first, LeaveStep::LeaveChannel, self.signaling.leave().await);
        note(&mut first, LeaveStep::Logout, self.signaling.logout().await);

        self.room = None;
        self.phase = Phase::Left;
        info!("left room");

        match first {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Return a `Left` coordinator to `Idle` so it can join again.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        match self.phase {
            Phase::Left => {
                self.phase = Phase::Idle;
                Ok(())
            }
            Phase::Idle => Ok(()),
            phase => Err(SessionError::InvalidRoomState {
                command: "reset",
                phase,
            }),
        }
    }

    /// Leave if joined and drop the coordinator.
    pub async fn dispose(mut self) -> Result<(), SessionError> {
        self.leave().await
    }
}
