use serde::{Deserialize, Serialize};

use crate::*;

/// One fixed grid position. Owns at most one linked tile plus, transiently
/// within a move, one staged merge partner of equal value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    coords: Coord2,
    linked: Option<Tile>,
    incoming: Option<Tile>,
}

impl Cell {
    pub(crate) const fn new(coords: Coord2) -> Self {
        Self {
            coords,
            linked: None,
            incoming: None,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        self.coords
    }

    pub const fn is_empty(&self) -> bool {
        self.linked.is_none()
    }

    pub fn linked_tile(&self) -> Option<&Tile> {
        self.linked.as_ref()
    }

    /// Links `tile` to this cell, stamping the cell's coordinates onto it.
    /// Overwriting an occupied cell is the caller's responsibility.
    pub fn link_tile(&mut self, mut tile: Tile) {
        tile.move_to(self.coords);
        self.incoming = None;
        self.linked = Some(tile);
    }

    /// Clears the linked tile without destroying it, for relinking elsewhere.
    pub fn unlink_tile(&mut self) -> Option<Tile> {
        self.linked.take()
    }

    /// Whether a sliding `tile` may come to rest here: the cell is empty, or
    /// holds an equal-valued tile with no merge partner staged yet. At most
    /// one partner per move keeps chain merges out of a single slide.
    pub fn can_accept(&self, tile: &Tile) -> bool {
        match self.linked {
            None => true,
            Some(linked) => linked.value() == tile.value() && self.incoming.is_none(),
        }
    }

    /// Stages `tile` as the merge partner. Requires `can_accept` to hold.
    pub fn link_tile_for_merge(&mut self, mut tile: Tile) {
        debug_assert!(self.can_accept(&tile));
        debug_assert!(self.linked.is_some());
        tile.move_to(self.coords);
        self.incoming = Some(tile);
    }

    pub const fn has_tile_for_merge(&self) -> bool {
        self.incoming.is_some()
    }

    /// Collapses the linked tile and its staged partner into a single tile of
    /// doubled value under the given fresh id. Both input tiles are consumed.
    pub fn merge_tiles(&mut self, id: TileId) -> Option<MergeEvent> {
        let incoming = self.incoming.take()?;
        let linked = self
            .linked
            .take()
            .expect("merge-pending tile requires a linked tile");
        debug_assert_eq!(linked.value(), incoming.value());

        let mut merged = Tile::new(id, linked.merged_value());
        merged.move_to(self.coords);
        let event = MergeEvent {
            coords: self.coords,
            consumed: (linked.id(), incoming.id()),
            tile: id,
            value: merged.value(),
        };
        self.linked = Some(merged);
        Some(event)
    }

    pub(crate) fn clear(&mut self) {
        self.linked = None;
        self.incoming = None;
    }
}
