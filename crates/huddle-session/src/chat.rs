//! Append-only chat log.
//!
//! Holds local echoes, remote deliveries and system notices in the order
//! they were appended. Entries are never edited or removed.

/// Where a chat entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    User,
    System,
}

/// A single line in the chat log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub author: String,
    pub text: String,
    pub origin: Origin,
}

#[derive(Debug)]
pub struct ChatLog {
    /// Author recorded on system notices.
    system_author: String,
    entries: Vec<ChatEntry>,
}

impl ChatLog {
    pub fn new(system_author: impl Into<String>) -> Self {
        Self {
            system_author: system_author.into(),
            entries: Vec::new(),
        }
    }

    /// Append a message typed by the local participant.
    pub fn append_local(&mut self, self_display_name: &str, text: &str) -> &ChatEntry {
        self.push(ChatEntry {
            author: self_display_name.to_string(),
            text: text.to_string(),
            origin: Origin::User,
        })
    }

    /// Append a chat message received from a peer.
    pub fn append_remote(&mut self, display_name: String, text: String) -> &ChatEntry {
        self.push(ChatEntry {
            author: display_name,
            text,
            origin: Origin::User,
        })
    }

    pub fn append_system(&mut self, text: impl Into<String>) -> &ChatEntry {
        let author = self.system_author.clone();
        self.push(ChatEntry {
            author,
            text: text.into(),
            origin: Origin::System,
        })
    }

    fn push(&mut self, entry: ChatEntry) -> &ChatEntry {
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&ChatEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
