//! Room session core: membership, chat, video tiles and local media for one
//! room, reconciled from a signaling channel and a media client.

pub mod chat;
pub mod coordinator;
pub mod error;
pub mod local_media;
pub mod loopback;
pub mod protocol;
pub mod room;
pub mod roster;
pub mod tiles;
pub mod transport;

pub use chat::{ChatEntry, ChatLog, Origin};
pub use coordinator::{Phase, SessionConfig, SessionCoordinator, SessionState};
pub use error::{JoinStage, LeaveStep, ProtocolError, SessionError, TransportError};
pub use local_media::{LocalMedia, LocalMediaState, ShareMode};
pub use loopback::{LoopbackMedia, LoopbackSignaling, LoopbackTrack};
pub use protocol::{ChannelMessage, OutboundMessage};
pub use room::{Room, RoomAction, RoomEvent};
pub use roster::{Arrival, Departure, Participant, Roster};
pub use tiles::{SizeClass, Tile, TileLayout};
pub use transport::{
    EncoderConfig, MediaClient, MediaEvent, MediaKind, MediaTrack, SignalingChannel,
    SignalingEvent, TrackHandle, TrackSource,
};
