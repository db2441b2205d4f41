use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

pub const SCORE_BOARD_SIZE: usize = 10;

/// Top scores, best first, zero-padded to exactly `SCORE_BOARD_SIZE` entries.
/// Serializes as a plain array; where it gets stored is the caller's concern.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreBoard {
    entries: Vec<Score>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Score] {
        &self.entries
    }

    pub fn best(&self) -> Score {
        self.entries.first().copied().unwrap_or(0)
    }

    /// Ranks `score` into the board. Returns whether it made the cut; the
    /// zero padding never counts as a cut, so an unplayed game ranks nowhere.
    pub fn record(&mut self, score: Score) -> bool {
        self.entries.push(score);
        self.entries.sort_unstable_by(|a, b| b.cmp(a));
        let made = score > 0 && self.entries[..SCORE_BOARD_SIZE].contains(&score);
        self.entries.truncate(SCORE_BOARD_SIZE);
        self.normalize();
        made
    }

    /// Restores the fixed-length, sorted shape after deserializing data an
    /// older build (or the player) may have edited.
    fn normalize(&mut self) {
        self.entries.sort_unstable_by(|a, b| b.cmp(a));
        self.entries.truncate(SCORE_BOARD_SIZE);
        while self.entries.len() < SCORE_BOARD_SIZE {
            self.entries.push(0);
        }
    }

    pub fn from_entries(entries: Vec<Score>) -> Self {
        let mut board = Self { entries };
        board.normalize();
        board
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self {
            entries: vec![0; SCORE_BOARD_SIZE],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zero_padded() {
        let board = ScoreBoard::new();
        assert_eq!(board.entries(), [0; SCORE_BOARD_SIZE]);
        assert_eq!(board.best(), 0);
    }

    #[test]
    fn record_keeps_descending_order_and_fixed_length() {
        let mut board = ScoreBoard::new();
        assert!(board.record(40));
        assert!(board.record(120));
        assert!(board.record(80));

        assert_eq!(board.entries().len(), SCORE_BOARD_SIZE);
        assert_eq!(&board.entries()[..3], [120, 80, 40]);
        assert_eq!(board.best(), 120);
    }

    #[test]
    fn zero_scores_never_make_the_board() {
        let mut board = ScoreBoard::new();
        assert!(!board.record(0));

        board.record(50);
        assert!(!board.record(0));
        assert_eq!(&board.entries()[..2], [50, 0]);
    }

    #[test]
    fn low_scores_fall_off_a_full_board() {
        let mut board = ScoreBoard::new();
        for score in 1..=10 {
            board.record(score * 100);
        }

        assert!(!board.record(5));
        assert_eq!(board.entries().first(), Some(&1000));
        assert_eq!(board.entries().last(), Some(&100));
    }

    #[test]
    fn from_entries_normalizes_foreign_data() {
        let board = ScoreBoard::from_entries(alloc::vec![30, 10, 20]);
        assert_eq!(&board.entries()[..3], [30, 20, 10]);
        assert_eq!(board.entries().len(), SCORE_BOARD_SIZE);
    }

    #[test]
    fn serializes_as_a_plain_array() {
        let mut board = ScoreBoard::new();
        board.record(12);

        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, "[12,0,0,0,0,0,0,0,0,0]");
        assert_eq!(serde_json::from_str::<ScoreBoard>(&json).unwrap(), board);
    }
}
