//! Inbound event pump.

use std::future::poll_fn;
use std::task::{Context, Poll};

use futures_util::future::BoxFuture;
use futures_util::stream::{FuturesUnordered, StreamExt};
use futures_util::FutureExt;
use huddle_common::ParticipantId;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::SessionCoordinator;
use crate::room::{RoomAction, RoomEvent};
use crate::tiles::surface_id;
use crate::transport::{MediaEvent, MediaKind, SignalingEvent};

/// The coordinator's subscriptions for one joined room.
pub(crate) struct Inbound {
    signaling: mpsc::Receiver<SignalingEvent>,
    media: mpsc::Receiver<MediaEvent>,
    lookups: FuturesUnordered<BoxFuture<'static, RoomEvent>>,
}

impl Inbound {
    pub(crate) fn new(
        signaling: mpsc::Receiver<SignalingEvent>,
        media: mpsc::Receiver<MediaEvent>,
    ) -> Self {
        Self {
            signaling,
            media,
            lookups: FuturesUnordered::new(),
        }
    }

    /// Next ready item: signaling first, then media, then finished lookups.
    /// `Ready(None)` once both channels are closed and no lookup is pending.
    fn poll_next(&mut self, cx: &mut Context<'_>) -> Poll<Option<RoomEvent>> {
        let mut open = false;

        match self.signaling.poll_recv(cx) {
            Poll::Ready(Some(event)) => return Poll::Ready(Some(event.into())),
            Poll::Ready(None) => {}
            Poll::Pending => open = true,
        }
        match self.media.poll_recv(cx) {
            Poll::Ready(Some(event)) => return Poll::Ready(Some(event.into())),
            Poll::Ready(None) => {}
            Poll::Pending => open = true,
        }
        match self.lookups.poll_next_unpin(cx) {
            Poll::Ready(Some(event)) => return Poll::Ready(Some(event)),
            Poll::Ready(None) => {}
            Poll::Pending => open = true,
        }

        if open {
            Poll::Pending
        } else {
            Poll::Ready(None)
        }
    }
}

impl From<SignalingEvent> for RoomEvent {
    fn from(event: SignalingEvent) -> Self {
        match event {
            SignalingEvent::ParticipantJoined(id) => Self::ParticipantJoined(id),
            SignalingEvent::ParticipantLeft(id) => Self::ParticipantLeft(id),
            SignalingEvent::Message(raw) => Self::MessageReceived(raw),
        }
    }
}

impl From<MediaEvent> for RoomEvent {
    fn from(event: MediaEvent) -> Self {
        match event {
            MediaEvent::Published {
                participant_id,
                kind,
            } => Self::MediaPublished {
                participant_id,
                kind,
            },
            MediaEvent::Unpublished {
                participant_id,
                kind,
            } => Self::MediaUnpublished {
                participant_id,
                kind,
            },
        }
    }
}

impl SessionCoordinator {
    /// Wait for one inbound event and handle it.
    ///
    /// Returns `false` when there is nothing left to wait for: not joined,
    /// or both subscriptions closed with no lookup outstanding.
    pub async fn next_event(&mut self) -> bool {
        let Some(inbound) = self.inbound.as_mut() else {
            return false;
        };
        let next = poll_fn(|cx| inbound.poll_next(cx)).await;
        match next {
            Some(event) => {
                self.dispatch(event).await;
                true
            }
            None => false,
        }
    }

    /// Handle every inbound event that is ready now. Returns how many.
    pub async fn process_ready(&mut self) -> usize {
        let mut handled = 0;
        loop {
            let Some(inbound) = self.inbound.as_mut() else {
                break;
            };
            let next = poll_fn(|cx| inbound.poll_next(cx)).now_or_never();
            match next {
                Some(Some(event)) => {
                    self.dispatch(event).await;
                    handled += 1;
                }
                _ => break,
            }
        }
        handled
    }

    /// Feed one event to the room and carry out the resulting actions.
    pub(crate) async fn dispatch(&mut self, event: RoomEvent) {
        let Some(room) = self.room.as_mut() else {
            return;
        };
        debug!(?event, "room event");
        for action in room.handle(event) {
            self.perform(action).await;
        }
    }

    async fn perform(&mut self, action: RoomAction) {
        match action {
            RoomAction::ResolveName(id) => self.start_lookup(id),
            RoomAction::SubscribeMedia {
                participant_id,
                kind,
            } => self.subscribe_remote(participant_id, kind).await,
        }
    }

    fn start_lookup(&mut self, id: ParticipantId) {
        let Some(inbound) = self.inbound.as_mut() else {
            return;
        };
        let signaling = self.signaling.clone();
        inbound.lookups.push(
            async move {
                let name = match signaling.display_name(&id).await {
                    Ok(name) => Some(name),
                    Err(e) => {
                        warn!(participant_id = %id, error = %e, "display name lookup failed");
                        None
                    }
                };
                RoomEvent::NameResolved { id, name }
            }
            .boxed(),
        );
    }

    async fn subscribe_remote(&mut self, participant_id: ParticipantId, kind: MediaKind) {
        match self.media.subscribe_remote(&participant_id, kind).await {
            Ok(track) => {
                let surface = (kind == MediaKind::Video).then(|| surface_id(&participant_id));
                if let Err(e) = track.play(surface.as_deref()) {
                    warn!(participant_id = %participant_id, ?kind, error = %e, "remote playback failed");
                }
                debug!(participant_id = %participant_id, ?kind, "subscribed to remote track");
            }
            Err(e) => {
                warn!(participant_id = %participant_id, ?kind, error = %e, "remote subscribe failed");
                if kind == MediaKind::Video {
                    if let Some(room) = self.room.as_mut() {
                        room.handle(RoomEvent::MediaUnpublished {
                            participant_id,
                            kind,
                        });
                    }
                }
            }
        }
    }
}
