//! Commands available while joined.

use std::slice;

use huddle_common::ParticipantId;
use tracing::{debug, info, warn};

use super::{Phase, SessionCoordinator};
use crate::error::{SessionError, TransportError};
use crate::local_media::ShareMode;
use crate::protocol::OutboundMessage;
use crate::room::Room;
use crate::tiles::surface_id;
use crate::transport::TrackHandle;

/// The room, if `command` may run in `phase`.
fn joined<'a>(
    phase: Phase,
    room: &'a mut Option<Room>,
    command: &'static str,
) -> Result<&'a mut Room, SessionError> {
    match room {
        Some(room) if phase == Phase::Joined => Ok(room),
        _ => Err(SessionError::InvalidRoomState { command, phase }),
    }
}

fn streaming<'a>(
    phase: Phase,
    room: &'a mut Option<Room>,
    command: &'static str,
) -> Result<&'a mut Room, SessionError> {
    let room = joined(phase, room, command)?;
    if !room.local_media().is_streaming() {
        return Err(SessionError::NotStreaming(command));
    }
    Ok(room)
}

/// Stop capture and free the devices behind `tracks`.
fn release(tracks: &[TrackHandle]) {
    for track in tracks {
        track.stop();
        track.close();
    }
}

fn play_local(track: &TrackHandle, self_id: &ParticipantId) {
    if let Err(e) = track.play(Some(&surface_id(self_id))) {
        warn!(track = track.id(), error = %e, "local preview failed");
    }
}

impl SessionCoordinator {
    /// Append `text` to the chat log and broadcast it.
    ///
    /// The entry is appended before the broadcast and stays even if the
    /// broadcast fails. Blank messages are ignored.
    pub async fn send_chat_message(&mut self, text: &str) -> Result<(), SessionError> {
        let room = joined(self.phase, &mut self.room, "send_chat_message")?;
        if text.trim().is_empty() {
            debug!("ignoring blank chat message");
            return Ok(());
        }
        let entry = room.append_local(text);
        let payload = OutboundMessage::Chat {
            text: entry.text,
            display_name: entry.author,
        }
        .encode();
        if let Err(e) = self.signaling.send_message(payload).await {
            warn!(error = %e, "chat broadcast failed");
        }
        Ok(())
    }

    /// Acquire microphone and camera, show the local tile and publish both.
    /// Does nothing when already streaming.
    pub async fn join_stream(&mut self) -> Result<(), SessionError> {
        let room = joined(self.phase, &mut self.room, "join_stream")?;
        if room.local_media().is_streaming() {
            return Ok(());
        }

        let (microphone, camera) = self
            .media
            .create_microphone_and_camera_tracks(&self.config.encoder)
            .await
            .map_err(SessionError::DeviceUnavailable)?;

        let tracks = [microphone.clone(), camera.clone()];
        if let Err(e) = self.media.publish(&tracks).await {
            release(&tracks);
            return Err(SessionError::media("publish", e));
        }

        play_local(&camera, &self.self_id);
        room.show_self_tile();
        room.local_media_mut().start(microphone, camera);
        info!(participant_id = %self.self_id, "stream started");
        Ok(())
    }

    /// Unpublish and release every local track, drop the local tile and tell
    /// peers through the channel.
    pub async fn leave_stream(&mut self) -> Result<(), SessionError> {
        streaming(self.phase, &mut self.room, "leave_stream")?;
        self.stop_stream()
            .await
            .map_err(|e| SessionError::media("unpublish", e))
    }

    /// Release every local track and announce the stream's end. Returns the
    /// unpublish result; the rest always runs.
    async fn stop_stream(&mut self) -> Result<(), TransportError> {
        let Some(room) = self.room.as_mut() else {
            return Ok(());
        };
        let published = room.local_media().published_tracks();
        let tracks = room.local_media_mut().take_all();
        room.hide_self_tile();

        let unpublished = self.media.unpublish(&published).await;
        release(&tracks);

        let notice = OutboundMessage::UserLeft {
            uid: self.self_id.clone(),
        }
        .encode();
        if let Err(e) = self.signaling.send_message(notice).await {
            warn!(error = %e, "stream-leave broadcast failed");
        }
        info!(participant_id = %self.self_id, "stream stopped");
        unpublished
    }

    /// A source swap failed and the previous source could not be restored,
    /// leaving no video published. Stop the whole stream.
    async fn abandon_stream(&mut self, operation: &'static str, source: TransportError) -> SessionError {
        warn!(operation, error = %source, "no video source left, stopping stream");
        if let Err(e) = self.stop_stream().await {
            warn!(error = %e, "unpublish while stopping stream failed");
        }
        SessionError::StreamEnded { operation, source }
    }

    /// Flip the camera mute flag. Returns the new muted state.
    pub async fn toggle_camera(&mut self) -> Result<bool, SessionError> {
        let room = streaming(self.phase, &mut self.room, "toggle_camera")?;
        let muted = !room.local_media().state().camera_muted;
        if let Some(camera) = room.local_media().camera() {
            camera
                .set_muted(muted)
                .await
                .map_err(|e| SessionError::media("mute", e))?;
        }
        room.local_media_mut().set_camera_muted(muted);
        debug!(muted, "camera toggled");
        Ok(muted)
    }

    /// Flip the microphone mute flag. Returns the new muted state.
    pub async fn toggle_mic(&mut self) -> Result<bool, SessionError> {
        let room = streaming(self.phase, &mut self.room, "toggle_mic")?;
        let muted = !room.local_media().state().mic_muted;
        if let Some(microphone) = room.local_media().microphone() {
            microphone
                .set_muted(muted)
                .await
                .map_err(|e| SessionError::media("mute", e))?;
        }
        room.local_media_mut().set_mic_muted(muted);
        debug!(muted, "microphone toggled");
        Ok(muted)
    }

    /// Swap the published video source between camera and screen. Returns
    /// the mode now active.
    ///
    /// Must not be called again until the previous call returns.
    pub async fn toggle_screen_share(&mut self) -> Result<ShareMode, SessionError> {
        let room = streaming(self.phase, &mut self.room, "toggle_screen_share")?;
        let camera = room.local_media().camera().cloned();
        let mode = room.local_media().mode();

        match mode {
            ShareMode::CameraActive => {
                let screen = self
                    .media
                    .create_screen_track()
                    .await
                    .map_err(SessionError::DeviceUnavailable)?;

                let previous_focus = room.tiles().focused().cloned();
                room.focus(Some(&self.self_id));

                if let Some(camera) = &camera {
                    if let Err(e) = self.media.unpublish(slice::from_ref(camera)).await {
                        room.focus(previous_focus.as_ref());
                        release(&[screen]);
                        return Err(SessionError::media("unpublish", e));
                    }
                    room.local_media_mut().set_camera_published(false);
                }

                if let Err(e) = self.media.publish(slice::from_ref(&screen)).await {
                    room.focus(previous_focus.as_ref());
                    release(&[screen]);
                    if let Some(camera) = &camera {
                        if let Err(restore) = self.media.publish(slice::from_ref(camera)).await {
                            warn!(error = %restore, "could not republish camera");
                            return Err(self.abandon_stream("publish", e).await);
                        }
                        room.local_media_mut().set_camera_published(true);
                    }
                    return Err(SessionError::media("publish", e));
                }

                play_local(&screen, &self.self_id);
                room.local_media_mut().begin_screen(screen);
                info!(participant_id = %self.self_id, "screen share started");
                Ok(ShareMode::ScreenActive)
            }
            ShareMode::ScreenActive => {
                let screen = room.local_media().screen().cloned();
                if let Some(screen) = &screen {
                    self.media
                        .unpublish(slice::from_ref(screen))
                        .await
                        .map_err(|e| SessionError::media("unpublish", e))?;
                }

                if let Some(camera) = &camera {
                    if let Err(e) = self.media.publish(slice::from_ref(camera)).await {
                        if let Some(screen) = &screen {
                            if let Err(restore) = self.media.publish(slice::from_ref(screen)).await {
                                warn!(error = %restore, "could not restore screen share");
                                return Err(self.abandon_stream("publish", e).await);
                            }
                        }
                        return Err(SessionError::media("publish", e));
                    }
                    play_local(camera, &self.self_id);
                }

                if let Some(screen) = room.local_media_mut().end_screen() {
                    release(&[screen]);
                }
                room.local_media_mut().set_camera_published(camera.is_some());
                room.clear_self_focus();
                info!(participant_id = %self.self_id, "screen share stopped");
                Ok(ShareMode::CameraActive)
            }
        }
    }

    /// Focus a participant's tile, or clear focus with `None`. Returns
    /// `false` when the participant has no tile.
    pub fn focus_tile(&mut self, target: Option<&ParticipantId>) -> Result<bool, SessionError> {
        let room = joined(self.phase, &mut self.room, "focus_tile")?;
        Ok(room.focus(target))
    }
}
