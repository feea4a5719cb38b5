//! Video tile layout and focus.
//!
//! One tile per participant with published video. At most one tile is
//! focused; while a focus is active the focused tile is `Grid` and every
//! other tile is `Shrunk`, otherwise every tile is `Grid`. Sizes are
//! recomputed after each mutation so the invariant holds by construction.

use huddle_common::ParticipantId;

/// Visual size class of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeClass {
    Grid,
    Shrunk,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub participant_id: ParticipantId,
    pub size_class: SizeClass,
    pub is_focused: bool,
}

impl Tile {
    /// Render surface the participant's video is played into.
    pub fn surface_id(&self) -> String {
        surface_id(&self.participant_id)
    }
}

pub fn surface_id(participant_id: &ParticipantId) -> String {
    format!("user-container-{participant_id}")
}

#[derive(Debug, Default)]
pub struct TileLayout {
    tiles: Vec<Tile>,
    focused: Option<ParticipantId>,
}

impl TileLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size class for a tile that is not focused.
    pub fn ambient_class(&self) -> SizeClass {
        if self.focused.is_some() {
            SizeClass::Shrunk
        } else {
            SizeClass::Grid
        }
    }

    /// Ensure a tile exists for `participant_id`. Returns `false` when one
    /// already did.
    pub fn insert(&mut self, participant_id: ParticipantId) -> bool {
        if self.contains(&participant_id) {
            return false;
        }
        let size_class = self.ambient_class();
        self.tiles.push(Tile {
            participant_id,
            size_class,
            is_focused: false,
        });
        true
    }

    /// Remove a participant's tile, clearing focus if it was focused.
    /// Returns `false` when no tile existed.
    pub fn remove(&mut self, participant_id: &ParticipantId) -> bool {
        let Some(pos) = self
            .tiles
            .iter()
            .position(|t| &t.participant_id == participant_id)
        else {
            return false;
        };
        self.tiles.remove(pos);
        if self.focused.as_ref() == Some(participant_id) {
            self.focused = None;
        }
        self.relayout();
        true
    }

    /// Focus a tile, or clear focus with `None`.
    ///
    /// Focusing a participant without a tile changes nothing and returns
    /// `false`.
    pub fn set_focus(&mut self, target: Option<&ParticipantId>) -> bool {
        match target {
            None => self.focused = None,
            Some(id) if self.contains(id) => self.focused = Some(id.clone()),
            Some(_) => return false,
        }
        self.relayout();
        true
    }

    /// Clear focus only if `participant_id` holds it.
    pub fn clear_focus_of(&mut self, participant_id: &ParticipantId) -> bool {
        if self.focused.as_ref() != Some(participant_id) {
            return false;
        }
        self.set_focus(None)
    }

    fn relayout(&mut self) {
        let focused = self.focused.as_ref();
        let ambient = self.ambient_class();
        for tile in &mut self.tiles {
            tile.is_focused = Some(&tile.participant_id) == focused;
            tile.size_class = if tile.is_focused {
                SizeClass::Grid
            } else {
                ambient
            };
        }
    }

    pub fn focused(&self) -> Option<&ParticipantId> {
        self.focused.as_ref()
    }

    pub fn get(&self, participant_id: &ParticipantId) -> Option<&Tile> {
        self.tiles
            .iter()
            .find(|t| &t.participant_id == participant_id)
    }

    pub fn contains(&self, participant_id: &ParticipantId) -> bool {
        self.get(participant_id).is_some()
    }

    /// Tiles in creation order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> ParticipantId {
        ParticipantId::from(s)
    }

    fn assert_invariant(layout: &TileLayout) {
        let focused: Vec<&Tile> = layout.tiles().iter().filter(|t| t.is_focused).collect();
        assert!(focused.len() <= 1);
        for tile in layout.tiles() {
            let expected = match focused.first() {
                Some(f) if f.participant_id != tile.participant_id => SizeClass::Shrunk,
                _ => SizeClass::Grid,
            };
            assert_eq!(tile.size_class, expected, "tile {}", tile.participant_id);
        }
    }

    #[test]
    fn insert_is_idempotent() {
        let mut layout = TileLayout::new();
        assert!(layout.insert(pid("b")));
        assert!(!layout.insert(pid("b")));
        assert_eq!(layout.len(), 1);
    }

    #[test]
    fn focus_shrinks_everyone_else() {
        let mut layout = TileLayout::new();
        layout.insert(pid("a"));
        layout.insert(pid("b"));
        layout.insert(pid("c"));

        assert!(layout.set_focus(Some(&pid("b"))));
        let b = layout.get(&pid("b")).unwrap();
        assert!(b.is_focused);
        assert_eq!(b.size_class, SizeClass::Grid);
        assert_eq!(layout.get(&pid("a")).unwrap().size_class, SizeClass::Shrunk);
        assert_eq!(layout.get(&pid("c")).unwrap().size_class, SizeClass::Shrunk);
        assert_invariant(&layout);
    }

    #[test]
    fn new_tile_during_focus_is_shrunk() {
        let mut layout = TileLayout::new();
        layout.insert(pid("a"));
        layout.set_focus(Some(&pid("a")));
        layout.insert(pid("b"));
        assert_eq!(layout.get(&pid("b")).unwrap().size_class, SizeClass::Shrunk);
        assert_invariant(&layout);
    }

    #[test]
    fn clearing_focus_restores_grid() {
        let mut layout = TileLayout::new();
        layout.insert(pid("a"));
        layout.insert(pid("b"));
        layout.set_focus(Some(&pid("a")));
        assert!(layout.set_focus(None));
        assert!(layout.focused().is_none());
        assert!(layout
            .tiles()
            .iter()
            .all(|t| t.size_class == SizeClass::Grid && !t.is_focused));
    }

    #[test]
    fn focus_moves_between_tiles() {
        let mut layout = TileLayout::new();
        layout.insert(pid("a"));
        layout.insert(pid("b"));
        layout.set_focus(Some(&pid("a")));
        layout.set_focus(Some(&pid("b")));
        assert_eq!(layout.focused(), Some(&pid("b")));
        assert!(!layout.get(&pid("a")).unwrap().is_focused);
        assert_invariant(&layout);
    }

    #[test]
    fn focusing_missing_tile_is_noop() {
        let mut layout = TileLayout::new();
        layout.insert(pid("a"));
        layout.set_focus(Some(&pid("a")));
        assert!(!layout.set_focus(Some(&pid("ghost"))));
        assert_eq!(layout.focused(), Some(&pid("a")));
    }

    #[test]
    fn removing_focused_tile_clears_focus() {
        let mut layout = TileLayout::new();
        layout.insert(pid("a"));
        layout.insert(pid("b"));
        layout.set_focus(Some(&pid("b")));

        assert!(layout.remove(&pid("b")));
        assert!(layout.focused().is_none());
        assert_eq!(layout.get(&pid("a")).unwrap().size_class, SizeClass::Grid);
        assert_invariant(&layout);
    }

    #[test]
    fn removing_other_tile_keeps_focus() {
        let mut layout = TileLayout::new();
        layout.insert(pid("a"));
        layout.insert(pid("b"));
        layout.insert(pid("c"));
        layout.set_focus(Some(&pid("a")));

        layout.remove(&pid("c"));
        assert_eq!(layout.focused(), Some(&pid("a")));
        assert_invariant(&layout);
        assert!(!layout.remove(&pid("c")));
    }

    #[test]
    fn clear_focus_of_only_affects_holder() {
        let mut layout = TileLayout::new();
        layout.insert(pid("me"));
        layout.insert(pid("b"));
        layout.set_focus(Some(&pid("b")));
        assert!(!layout.clear_focus_of(&pid("me")));
        assert_eq!(layout.focused(), Some(&pid("b")));
        assert!(layout.clear_focus_of(&pid("b")));
        assert!(layout.focused().is_none());
    }

    #[test]
    fn surface_id_format() {
        assert_eq!(surface_id(&pid("42")), "user-container-42");
    }
}
