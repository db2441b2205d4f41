use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Seedable pseudo-random spawner: uniform over empty cells, 2 or 4 with the
/// original 0.8/0.2 split. Not cryptographically strong, and not meant to be.
/// The rng state itself is not persistable; keep the seed around to replay a
/// game from the start.
#[derive(Clone, Debug)]
pub struct RandomTileSpawner {
    rng: SmallRng,
}

impl RandomTileSpawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl TileSpawner for RandomTileSpawner {
    fn pick_empty(&mut self, empty_count: CellCount) -> CellCount {
        self.rng.random_range(0..empty_count)
    }

    fn pick_value(&mut self) -> TileValue {
        if self.rng.random_bool(FOUR_TILE_CHANCE) {
            4
        } else {
            2
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_stay_in_bounds_and_values_in_domain() {
        let mut spawner = RandomTileSpawner::new(42);
        for _ in 0..200 {
            assert!(spawner.pick_empty(7) < 7);
            let value = spawner.pick_value();
            assert!(value == 2 || value == 4);
        }
    }

    #[test]
    fn same_seed_replays_the_same_sequence() {
        let mut a = RandomTileSpawner::new(7);
        let mut b = RandomTileSpawner::new(7);
        for _ in 0..50 {
            assert_eq!(a.pick_empty(16), b.pick_empty(16));
            assert_eq!(a.pick_value(), b.pick_value());
        }
    }

    #[test]
    fn four_tiles_come_out_at_about_one_in_five() {
        let mut spawner = RandomTileSpawner::new(0xF00D);
        let draws = 10_000;
        let fours = (0..draws)
            .filter(|_| spawner.pick_value() == 4)
            .count();

        // expectation 2_000, standard deviation 40; five sigmas of slack
        assert!(
            (1_800..2_200).contains(&fours),
            "got {fours} fours in {draws} draws"
        );
    }
}
