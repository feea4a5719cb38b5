use serde::{Deserialize, Serialize};
use std::fmt;

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Opaque participant identifier as handed out by the signaling channel.
///
/// Remote ids are whatever the channel reports; only locally generated ids
/// are guaranteed to be v4 UUIDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random (v4) identifier for the local participant.
    pub fn generate() -> Self {
        Self(new_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ParticipantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_id_is_valid_uuid() {
        let id = new_id();
        let parsed = uuid::Uuid::parse_str(&id);
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap().get_version_num(), 4);
    }

    #[test]
    fn new_id_is_unique() {
        assert_ne!(new_id(), new_id());
    }

    #[test]
    fn generated_participant_id_is_v4() {
        let pid = ParticipantId::generate();
        let parsed = uuid::Uuid::parse_str(pid.as_str()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn participant_id_accepts_opaque_strings() {
        let pid = ParticipantId::from("alice");
        assert_eq!(pid.as_str(), "alice");
        assert_eq!(pid.to_string(), "alice");
        assert_eq!(pid, ParticipantId::new(String::from("alice")));
    }

    #[test]
    fn participant_id_serializes_as_plain_string() {
        let pid = ParticipantId::from("bob");
        let json = serde_json::to_string(&pid).unwrap();
        assert_eq!(json, "\"bob\"");
        let back: ParticipantId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pid);
    }

    #[test]
    fn participant_id_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ParticipantId::from("a"));
        set.insert(ParticipantId::from("a"));
        assert_eq!(set.len(), 1);
    }
}
