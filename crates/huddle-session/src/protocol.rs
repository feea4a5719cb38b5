//! Payloads carried as text messages over the signaling channel.
//!
//! Every message is a JSON object tagged by a `type` field. Outbound
//! messages are encoded from [`OutboundMessage`]; inbound text is decoded
//! into [`ChannelMessage`], which is total: anything that does not parse
//! becomes [`ChannelMessage::Malformed`] or [`ChannelMessage::Unknown`]
//! instead of an error.

use huddle_common::ParticipantId;
use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Message type names used in the `type` field.
pub mod kinds {
    pub const CHAT: &str = "chat";
    pub const USER_LEFT: &str = "user_left";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireMessage {
    Chat {
        #[serde(alias = "message")]
        text: String,
        #[serde(rename = "displayName")]
        display_name: String,
    },
    UserLeft {
        uid: ParticipantId,
    },
}

/// Messages this participant broadcasts on the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    Chat { text: String, display_name: String },
    /// Local stream stopped; peers drop our tile without waiting for the
    /// media layer.
    UserLeft { uid: ParticipantId },
}

impl OutboundMessage {
    pub fn encode(&self) -> String {
        let wire = match self {
            Self::Chat { text, display_name } => WireMessage::Chat {
                text: text.clone(),
                display_name: display_name.clone(),
            },
            Self::UserLeft { uid } => WireMessage::UserLeft { uid: uid.clone() },
        };
        // Two string fields and a tag; serialization cannot fail.
        serde_json::to_string(&wire).unwrap_or_default()
    }
}

/// A decoded inbound channel message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelMessage {
    Chat { text: String, display_name: String },
    UserLeft { uid: ParticipantId },
    /// Well-formed object with a `type` this client does not understand.
    Unknown { kind: String },
    Malformed(ProtocolError),
}

impl ChannelMessage {
    pub fn decode(raw: &str) -> Self {
        match decode_inner(raw) {
            Ok(msg) => msg,
            Err(e) => Self::Malformed(e),
        }
    }
}

fn decode_inner(raw: &str) -> Result<ChannelMessage, ProtocolError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| ProtocolError::InvalidJson(e.to_string()))?;

    let kind = value
        .as_object()
        .ok_or(ProtocolError::NotAnObject)?
        .get("type")
        .and_then(|t| t.as_str())
        .ok_or(ProtocolError::MissingType)?
        .to_string();

    if kind != kinds::CHAT && kind != kinds::USER_LEFT {
        return Ok(ChannelMessage::Unknown { kind });
    }

    let wire: WireMessage =
        serde_json::from_value(value).map_err(|e| ProtocolError::InvalidFields {
            kind: kind.clone(),
            reason: e.to_string(),
        })?;

    Ok(match wire {
        WireMessage::Chat { text, display_name } => ChannelMessage::Chat { text, display_name },
        WireMessage::UserLeft { uid } => ChannelMessage::UserLeft { uid },
    })
}
