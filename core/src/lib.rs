#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use grid::*;
pub use score::*;
pub use session::*;
pub use spawner::*;
pub use tile::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod grid;
mod score;
mod session;
mod spawner;
mod tile;
mod types;

pub const DEFAULT_GRID_SIZE: Coord = 4;
pub const WINNING_TILE_VALUE: TileValue = 2048;
pub const INITIAL_TILE_COUNT: usize = 2;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub winning_value: TileValue,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, winning_value: TileValue) -> Self {
        Self {
            size,
            winning_value,
        }
    }

    pub fn new(size: Coord, winning_value: TileValue) -> Self {
        let size = size.clamp(2, Coord::MAX);
        let winning_value = winning_value.max(4).next_power_of_two();
        Self::new_unchecked(size, winning_value)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_GRID_SIZE, WINNING_TILE_VALUE)
    }
}
