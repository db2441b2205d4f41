use crate::*;

pub use random::*;
pub use scripted::*;

mod random;
mod scripted;

/// Probability that a spawned tile is a 4 rather than a 2.
pub const FOUR_TILE_CHANCE: f64 = 0.2;

/// Source of spawn randomness, injected into the engine so test suites can
/// substitute a deterministic one.
pub trait TileSpawner {
    /// Picks the index of the cell to spawn into, given the number of empty
    /// cells. The returned index must be less than `empty_count`.
    fn pick_empty(&mut self, empty_count: CellCount) -> CellCount;

    /// Picks the face value of the spawned tile, 2 or 4.
    fn pick_value(&mut self) -> TileValue;
}
