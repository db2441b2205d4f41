use serde::{Deserialize, Serialize};

use crate::*;

/// A numbered game piece. The coordinates are presentation metadata written
/// by the linking cell, never a second source of truth for the algorithm.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    value: TileValue,
    coords: Coord2,
}

impl Tile {
    pub(crate) const fn new(id: TileId, value: TileValue) -> Self {
        Self {
            id,
            value,
            coords: (0, 0),
        }
    }

    pub const fn id(&self) -> TileId {
        self.id
    }

    pub const fn value(&self) -> TileValue {
        self.value
    }

    pub const fn coords(&self) -> Coord2 {
        self.coords
    }

    /// Value of the tile that results from merging this tile with its equal.
    pub const fn merged_value(&self) -> TileValue {
        self.value * 2
    }

    pub(crate) fn move_to(&mut self, coords: Coord2) {
        self.coords = coords;
    }
}
