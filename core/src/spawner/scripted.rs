use alloc::collections::VecDeque;
use serde::{Deserialize, Serialize};

use super::*;

/// Spawner that replays queued picks, for deterministic test setups. When a
/// queue runs dry it falls back to the first empty cell and a 2.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptedSpawner {
    indices: VecDeque<CellCount>,
    values: VecDeque<TileValue>,
}

impl ScriptedSpawner {
    pub fn new(
        indices: impl IntoIterator<Item = CellCount>,
        values: impl IntoIterator<Item = TileValue>,
    ) -> Self {
        Self {
            indices: indices.into_iter().collect(),
            values: values.into_iter().collect(),
        }
    }
}

impl TileSpawner for ScriptedSpawner {
    fn pick_empty(&mut self, empty_count: CellCount) -> CellCount {
        match self.indices.pop_front() {
            Some(index) if index < empty_count => index,
            Some(index) => {
                log::warn!("scripted index {index} out of range {empty_count}, using 0");
                0
            }
            None => 0,
        }
    }

    fn pick_value(&mut self) -> TileValue {
        self.values.pop_front().unwrap_or(2)
    }
}
