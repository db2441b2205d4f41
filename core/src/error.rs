use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates outside the grid")]
    OutOfRange,
    #[error("No empty cell left to spawn into")]
    NoEmptyCell,
    #[error("No tile can move in that direction")]
    IllegalMove,
    #[error("Cell is already occupied")]
    CellOccupied,
    #[error("Tile value must be a power of two of at least 2")]
    InvalidTileValue,
}

pub type Result<T> = core::result::Result<T, GameError>;
