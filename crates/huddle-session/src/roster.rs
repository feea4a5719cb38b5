//! Room membership: participant id to display name.
//!
//! Display names arrive asynchronously (a lookup per participant), so an id
//! goes through a pending stage before it becomes a [`Participant`]. A leave
//! that lands while the lookup is still in flight cancels the pending entry,
//! and the late lookup result is then ignored. A leave that lands before its
//! join is remembered, and the late join cancels against it.

use std::collections::{HashMap, HashSet};

use huddle_common::ParticipantId;

/// A member of the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub display_name: String,
}

/// Whether a participant's arrival should produce a "joined" notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrival {
    /// Seen through a join notification.
    Announced,
    /// Present in the initial roster snapshot.
    Silent,
}

/// Result of removing an id from the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Departure {
    /// A known participant was removed.
    Removed(Participant),
    /// The name lookup was still in flight; it has been cancelled.
    Cancelled,
    /// Nothing known about this id. The leave is remembered until the
    /// matching join arrives.
    Unknown,
}

#[derive(Debug, Default)]
pub struct Roster {
    /// Known participants in arrival order.
    members: Vec<Participant>,
    /// Ids awaiting a display-name lookup.
    pending: HashMap<ParticipantId, Arrival>,
    /// Ids whose leave was seen before their join.
    departed: HashSet<ParticipantId>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `id` is present and needs a name lookup.
    ///
    /// Returns `false` when the id is already known or already pending, so
    /// duplicate notifications never start a second lookup. Also `false` when
    /// the id's leave was already seen; the two cancel out.
    pub fn expect(&mut self, id: ParticipantId, arrival: Arrival) -> bool {
        if self.contains(&id) || self.pending.contains_key(&id) {
            return false;
        }
        if self.departed.remove(&id) {
            return false;
        }
        self.pending.insert(id, arrival);
        true
    }

    /// Complete a pending lookup. Returns the inserted participant and how it
    /// arrived, or `None` when the id is no longer pending (left meanwhile, or
    /// already resolved).
    pub fn resolve(&mut self, id: &ParticipantId, display_name: String) -> Option<(Participant, Arrival)> {
        let arrival = self.pending.remove(id)?;
        let participant = Participant {
            id: id.clone(),
            display_name,
        };
        self.members.push(participant.clone());
        Some((participant, arrival))
    }

    /// Insert a participant whose name is already known. Idempotent.
    pub fn insert(&mut self, participant: Participant) -> bool {
        if self.contains(&participant.id) {
            return false;
        }
        self.pending.remove(&participant.id);
        self.members.push(participant);
        true
    }

    pub fn remove(&mut self, id: &ParticipantId) -> Departure {
        if let Some(pos) = self.members.iter().position(|p| &p.id == id) {
            return Departure::Removed(self.members.remove(pos));
        }
        if self.pending.remove(id).is_some() {
            return Departure::Cancelled;
        }
        self.departed.insert(id.clone());
        Departure::Unknown
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.members.iter().any(|p| &p.id == id)
    }

    pub fn is_pending(&self, id: &ParticipantId) -> bool {
        self.pending.contains_key(id)
    }

    /// Whether a leave for `id` is waiting for its join.
    pub fn has_departed(&self, id: &ParticipantId) -> bool {
        self.departed.contains(id)
    }

    pub fn display_name(&self, id: &ParticipantId) -> Option<&str> {
        self.members
            .iter()
            .find(|p| &p.id == id)
            .map(|p| p.display_name.as_str())
    }

    /// Present members in arrival order.
    pub fn current(&self) -> &[Participant] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> ParticipantId {
        ParticipantId::from(s)
    }

    fn ids(roster: &Roster) -> Vec<&str> {
        roster.current().iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn expect_then_resolve_inserts() {
        let mut roster = Roster::new();
        assert!(roster.expect(pid("b"), Arrival::Announced));
        assert!(roster.is_pending(&pid("b")));
        assert!(roster.is_empty());

        let (p, arrival) = roster.resolve(&pid("b"), "Bea".into()).unwrap();
        assert_eq!(p.display_name, "Bea");
        assert_eq!(arrival, Arrival::Announced);
        assert_eq!(roster.display_name(&pid("b")), Some("Bea"));
        assert!(!roster.is_pending(&pid("b")));
    }

    #[test]
    fn duplicate_expect_is_ignored() {
        let mut roster = Roster::new();
        assert!(roster.expect(pid("b"), Arrival::Announced));
        assert!(!roster.expect(pid("b"), Arrival::Announced));
        roster.resolve(&pid("b"), "Bea".into());
        assert!(!roster.expect(pid("b"), Arrival::Announced));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn leave_before_lookup_completes_cancels() {
        let mut roster = Roster::new();
        roster.expect(pid("b"), Arrival::Announced);
        assert_eq!(roster.remove(&pid("b")), Departure::Cancelled);
        assert!(roster.resolve(&pid("b"), "Bea".into()).is_none());
        assert!(roster.is_empty());
    }

    #[test]
    fn leave_before_join_cancels_the_join() {
        let mut roster = Roster::new();
        assert_eq!(roster.remove(&pid("b")), Departure::Unknown);
        assert!(roster.has_departed(&pid("b")));

        assert!(!roster.expect(pid("b"), Arrival::Announced));
        assert!(!roster.has_departed(&pid("b")));
        assert!(!roster.is_pending(&pid("b")));
        assert!(roster.is_empty());

        // A later rejoin is a fresh arrival.
        assert!(roster.expect(pid("b"), Arrival::Announced));
        assert!(roster.resolve(&pid("b"), "Bea".into()).is_some());
        assert_eq!(ids(&roster), vec!["b"]);
    }

    #[test]
    fn remove_unknown_is_noop() {
        let mut roster = Roster::new();
        roster.insert(Participant {
            id: pid("a"),
            display_name: "Ana".into(),
        });
        assert_eq!(roster.remove(&pid("zz")), Departure::Unknown);
        assert_eq!(ids(&roster), vec!["a"]);
    }

    #[test]
    fn remove_known_returns_participant() {
        let mut roster = Roster::new();
        roster.insert(Participant {
            id: pid("a"),
            display_name: "Ana".into(),
        });
        match roster.remove(&pid("a")) {
            Departure::Removed(p) => assert_eq!(p.display_name, "Ana"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(roster.is_empty());
    }

    #[test]
    fn insert_is_idempotent_and_clears_pending() {
        let mut roster = Roster::new();
        roster.expect(pid("a"), Arrival::Silent);
        let ana = Participant {
            id: pid("a"),
            display_name: "Ana".into(),
        };
        assert!(roster.insert(ana.clone()));
        assert!(!roster.insert(ana));
        assert!(!roster.is_pending(&pid("a")));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn members_keep_arrival_order() {
        let mut roster = Roster::new();
        for id in ["c", "a", "b"] {
            roster.expect(pid(id), Arrival::Silent);
        }
        roster.resolve(&pid("a"), "A".into());
        roster.resolve(&pid("c"), "C".into());
        roster.resolve(&pid("b"), "B".into());
        assert_eq!(ids(&roster), vec!["a", "c", "b"]);
    }

    #[test]
    fn any_completion_order_of_join_leave_pairs_converges() {
        // Joins for a..d; b and d leave. Try leaving before and after the
        // lookup resolves.
        let mut early = Roster::new();
        let mut late = Roster::new();
        for id in ["a", "b", "c", "d"] {
            early.expect(pid(id), Arrival::Announced);
            late.expect(pid(id), Arrival::Announced);
        }

        early.remove(&pid("b"));
        early.remove(&pid("d"));
        for id in ["a", "b", "c", "d"] {
            early.resolve(&pid(id), id.to_uppercase());
            late.resolve(&pid(id), id.to_uppercase());
        }
        late.remove(&pid("d"));
        late.remove(&pid("b"));

        let mut e = ids(&early);
        let mut l = ids(&late);
        e.sort();
        l.sort();
        assert_eq!(e, vec!["a", "c"]);
        assert_eq!(e, l);
    }
}
