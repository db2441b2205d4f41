use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// One tile changing cells during a move. `merging` marks relocations that
/// land on an equal-valued tile and end in the merge pass.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Relocation {
    pub tile: TileId,
    pub value: TileValue,
    pub from: Coord2,
    pub to: Coord2,
    pub merging: bool,
}

/// Two equal tiles collapsing into one of doubled value.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MergeEvent {
    pub coords: Coord2,
    pub consumed: (TileId, TileId),
    pub tile: TileId,
    pub value: TileValue,
}

/// Everything a presentation layer needs to animate and score one move.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub relocations: Vec<Relocation>,
    pub merges: Vec<MergeEvent>,
    pub score_delta: Score,
    pub reached_winning_value: bool,
}

impl MoveOutcome {
    /// Whether this outcome could have caused an update to the game
    pub fn has_update(&self) -> bool {
        !self.relocations.is_empty()
    }
}

/// The movement-and-merge engine. Owns the grid and the injected spawn
/// randomness; knows nothing about scores, input phases, or rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine<S = RandomTileSpawner> {
    config: GameConfig,
    grid: Grid,
    spawner: S,
    next_tile_id: TileId,
}

impl<S: TileSpawner> PlayEngine<S> {
    /// Fresh game: empty grid plus the two initial tiles.
    pub fn new(config: GameConfig, spawner: S) -> Self {
        let mut engine = Self::empty(config, spawner);
        engine.reset();
        engine
    }

    /// Engine with no tiles at all, for `place_tile` setups and restores.
    pub fn empty(config: GameConfig, spawner: S) -> Self {
        Self {
            config,
            grid: Grid::new(config.size),
            spawner,
            next_tile_id: 0,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tile_at(&self, coords: Coord2) -> Result<Option<Tile>> {
        let coords = self.grid.validate_coords(coords)?;
        Ok(self.grid[coords].linked_tile().copied())
    }

    pub fn iter_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.grid.iter_tiles()
    }

    pub fn max_tile_value(&self) -> TileValue {
        self.iter_tiles().map(Tile::value).max().unwrap_or(0)
    }

    /// Whether sliding toward `direction` would relocate any tile. Agrees
    /// exactly with `apply_move` and never mutates state.
    pub fn can_move(&self, direction: Direction) -> bool {
        self.grid
            .direction_groups(direction)
            .iter()
            .any(|group| self.group_can_slide(group))
    }

    /// No direction is legal: the game is lost.
    pub fn is_lost(&self) -> bool {
        Direction::ALL
            .into_iter()
            .all(|direction| !self.can_move(direction))
    }

    /// Some tile has reached the winning value. Monotone across moves, so
    /// repeated calls without an intervening move agree.
    pub fn has_winning_tile(&self) -> bool {
        self.max_tile_value() >= self.config.winning_value
    }

    /// Slides every tile toward `direction`, performs the staged merges, and
    /// reports what happened. Fails with `IllegalMove` (changing nothing)
    /// when `can_move` is false.
    pub fn apply_move(&mut self, direction: Direction) -> Result<MoveOutcome> {
        if !self.can_move(direction) {
            return Err(GameError::IllegalMove);
        }

        let mut outcome = MoveOutcome::default();
        for group in self.grid.direction_groups(direction) {
            self.slide_group(&group, &mut outcome);
        }
        self.merge_staged(&mut outcome);

        log::debug!(
            "applied {:?}: {} relocations, {} merges, +{}",
            direction,
            outcome.relocations.len(),
            outcome.merges.len(),
            outcome.score_delta
        );
        Ok(outcome)
    }

    /// Spawns one tile into a uniformly chosen empty cell: 2 with probability
    /// 0.8, 4 with probability 0.2.
    pub fn spawn_tile(&mut self) -> Result<Tile> {
        let empty = self.grid.empty_cells();
        if empty.is_empty() {
            return Err(GameError::NoEmptyCell);
        }

        let pick = self.spawner.pick_empty(empty.len().try_into().unwrap());
        debug_assert!(usize::from(pick) < empty.len());
        let coords = empty[usize::from(pick)];
        let value = self.spawner.pick_value();

        let mut tile = Tile::new(self.alloc_tile_id(), value);
        tile.move_to(coords);
        self.grid[coords].link_tile(tile);
        log::debug!("spawned {} at {:?}", value, coords);
        Ok(tile)
    }

    /// Places a tile into a specific empty cell. Setup/restore hook; regular
    /// play only ever spawns.
    pub fn place_tile(&mut self, coords: Coord2, value: TileValue) -> Result<Tile> {
        let coords = self.grid.validate_coords(coords)?;
        if value < 2 || !value.is_power_of_two() {
            return Err(GameError::InvalidTileValue);
        }
        if !self.grid[coords].is_empty() {
            return Err(GameError::CellOccupied);
        }

        let mut tile = Tile::new(self.alloc_tile_id(), value);
        tile.move_to(coords);
        self.grid[coords].link_tile(tile);
        Ok(tile)
    }

    /// Tears down all tile ownership and spawns the two initial tiles.
    pub fn reset(&mut self) {
        self.grid.clear();
        for _ in 0..INITIAL_TILE_COUNT {
            self.spawn_tile()
                .expect("cleared grid has room for the initial tiles");
        }
    }

    fn group_can_slide(&self, group: &[Coord2]) -> bool {
        group.windows(2).any(|pair| {
            let (target, source) = (pair[0], pair[1]);
            match self.grid[source].linked_tile() {
                Some(tile) => self.grid[target].can_accept(tile),
                None => false,
            }
        })
    }

    /// Walks one group from the trailing end toward the leading edge, moving
    /// each tile to the furthest cell that still accepts it. Merges are only
    /// staged here; `merge_staged` performs them once all groups are done, so
    /// no tile merges twice in one move.
    fn slide_group(&mut self, group: &[Coord2], outcome: &mut MoveOutcome) {
        for i in 1..group.len() {
            let source = group[i];
            let Some(tile) = self.grid[source].linked_tile().copied() else {
                continue;
            };

            let mut target = None;
            for &candidate in group[..i].iter().rev() {
                if !self.grid[candidate].can_accept(&tile) {
                    break;
                }
                target = Some(candidate);
            }
            let Some(target) = target else {
                continue;
            };

            let tile = self
                .grid[source]
                .unlink_tile()
                .expect("source cell was checked non-empty");
            let merging = !self.grid[target].is_empty();
            if merging {
                self.grid[target].link_tile_for_merge(tile);
            } else {
                self.grid[target].link_tile(tile);
            }
            outcome.relocations.push(Relocation {
                tile: tile.id(),
                value: tile.value(),
                from: source,
                to: target,
                merging,
            });
        }
    }

    fn merge_staged(&mut self, outcome: &mut MoveOutcome) {
        let staged: Vec<Coord2> = self
            .grid
            .iter_coords()
            .filter(|&coords| self.grid[coords].has_tile_for_merge())
            .collect();

        for coords in staged {
            let id = self.alloc_tile_id();
            let event = self
                .grid[coords]
                .merge_tiles(id)
                .expect("staged cell has a merge-pending tile");
            outcome.score_delta += event.value;
            if event.value >= self.config.winning_value {
                outcome.reached_winning_value = true;
            }
            outcome.merges.push(event);
        }
    }

    fn alloc_tile_id(&mut self) -> TileId {
        let id = self.next_tile_id;
        self.next_tile_id += 1;
        id
    }
}
