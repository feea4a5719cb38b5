//! Interfaces to the two external collaborators.
//!
//! The coordinator only ever talks to a [`SignalingChannel`] (membership and
//! chat) and a [`MediaClient`] (audio/video publish and subscribe). Neither
//! wire format is modelled here.

mod media;
mod signaling;

pub use media::{
    EncoderConfig, MediaClient, MediaEvent, MediaKind, MediaTrack, TrackHandle, TrackSource,
};
pub use signaling::{SignalingChannel, SignalingEvent};
