use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Ordered cell coordinates along one row or column, leading edge first.
/// Index 0 is the edge tiles accumulate against for the requested direction.
pub type CellGroup = SmallVec<[Coord2; 8]>;

/// The `N×N` cell collection. Cells never move; tiles are relinked between
/// them as moves are applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    pub fn new(size: Coord) -> Self {
        let size = usize::from(size);
        let cells = Array2::from_shape_fn((size, size), |(x, y)| {
            Cell::new((x.try_into().unwrap(), y.try_into().unwrap()))
        });
        Self { cells }
    }

    pub fn size(&self) -> Coord {
        self.cells.dim().0.try_into().unwrap()
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::OutOfRange)
        }
    }

    /// Row-major coordinates of every cell with no linked tile. The spawner
    /// picks uniformly over this list.
    pub fn empty_cells(&self) -> Vec<Coord2> {
        self.iter_coords()
            .filter(|&coords| self[coords].is_empty())
            .collect()
    }

    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let size = self.size();
        (0..size).flat_map(move |y| (0..size).map(move |x| (x, y)))
    }

    pub fn iter_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().filter_map(Cell::linked_tile)
    }

    /// One group per row, walking from the leading edge outward. Not
    /// reversed, the leading edge is `x = 0` (a leftward move); reversed, it
    /// is `x = N - 1` (a rightward move).
    pub fn grouped_by_row(&self, reversed: bool) -> Vec<CellGroup> {
        let size = self.size();
        (0..size)
            .map(|y| {
                let mut group: CellGroup = (0..size).map(|x| (x, y)).collect();
                if reversed {
                    group.reverse();
                }
                group
            })
            .collect()
    }

    /// One group per column; the leading edge is `y = 0` (an upward move),
    /// or `y = N - 1` when reversed (a downward move).
    pub fn grouped_by_column(&self, reversed: bool) -> Vec<CellGroup> {
        let size = self.size();
        (0..size)
            .map(|x| {
                let mut group: CellGroup = (0..size).map(|y| (x, y)).collect();
                if reversed {
                    group.reverse();
                }
                group
            })
            .collect()
    }

    pub fn direction_groups(&self, direction: Direction) -> Vec<CellGroup> {
        match direction {
            Direction::Up => self.grouped_by_column(false),
            Direction::Down => self.grouped_by_column(true),
            Direction::Left => self.grouped_by_row(false),
            Direction::Right => self.grouped_by_row(true),
        }
    }

    pub(crate) fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.clear();
        }
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}
