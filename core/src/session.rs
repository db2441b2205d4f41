use serde::{Deserialize, Serialize};

use crate::*;

/// Input gate the presentation layer drives: commands are only accepted while
/// `Idle`, and the layer reports back when its animations are done.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputPhase {
    Idle,
    Animating,
}

impl InputPhase {
    pub const fn accepts_input(self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl Default for InputPhase {
    fn default() -> Self {
        Self::Idle
    }
}

/// One played turn: the move itself, the tile spawned after it, and the
/// terminal signals the caller should surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub outcome: MoveOutcome,
    pub spawned: Tile,
    /// The winning value was reached and had not been announced before.
    pub won_now: bool,
    /// No legal move remains after the spawn.
    pub lost: bool,
}

/// Controller that owns a game from start to finish: accumulates the score,
/// latches the win announcement, and serializes input through the
/// Idle/Animating machine. The engine itself stays free of all of this.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession<S = RandomTileSpawner> {
    engine: PlayEngine<S>,
    score: Score,
    win_announced: bool,
    phase: InputPhase,
}

impl<S: TileSpawner> GameSession<S> {
    pub fn new(engine: PlayEngine<S>) -> Self {
        Self {
            engine,
            score: 0,
            win_announced: false,
            phase: InputPhase::default(),
        }
    }

    pub fn engine(&self) -> &PlayEngine<S> {
        &self.engine
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn phase(&self) -> InputPhase {
        self.phase
    }

    pub fn is_lost(&self) -> bool {
        self.engine.is_lost()
    }

    /// Plays one directional command. Returns `Ok(None)` when the command is
    /// ignored: input is gated by a running animation, or the direction is a
    /// no-op. A played turn moves the phase to `Animating`.
    pub fn handle_move(&mut self, direction: Direction) -> Result<Option<TurnReport>> {
        if !self.phase.accepts_input() {
            log::debug!("ignoring {:?}, animation still running", direction);
            return Ok(None);
        }
        if !self.engine.can_move(direction) {
            return Ok(None);
        }

        let outcome = self.engine.apply_move(direction)?;
        let spawned = self.engine.spawn_tile()?;
        self.score += outcome.score_delta;

        let lost = self.engine.is_lost();
        let won_now = !self.win_announced && self.engine.has_winning_tile();
        if won_now {
            self.win_announced = true;
        }
        self.phase = InputPhase::Animating;

        Ok(Some(TurnReport {
            outcome,
            spawned,
            won_now,
            lost,
        }))
    }

    /// The presentation layer finished animating the last turn; input opens
    /// up again.
    pub fn animation_finished(&mut self) {
        self.phase = InputPhase::Idle;
    }

    /// Back to the two-tile initial state with a zero score.
    pub fn restart(&mut self) {
        self.engine.reset();
        self.score = 0;
        self.win_announced = false;
        self.phase = InputPhase::Idle;
        log::debug!("session restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(tiles: &[(Coord2, TileValue)], spawner: ScriptedSpawner) -> GameSession<ScriptedSpawner> {
        let config = GameConfig::default();
        let mut engine = PlayEngine::empty(config, spawner);
        for &(coords, value) in tiles {
            engine.place_tile(coords, value).unwrap();
        }
        GameSession::new(engine)
    }

    #[test]
    fn played_turn_accumulates_score_and_spawns() {
        let mut session = session(&[((0, 0), 2), ((3, 0), 2)], ScriptedSpawner::default());

        let report = session.handle_move(Direction::Left).unwrap().unwrap();

        assert_eq!(report.outcome.score_delta, 4);
        assert_eq!(session.score(), 4);
        assert_eq!(session.engine().iter_tiles().count(), 2);
        assert_eq!(session.phase(), InputPhase::Animating);
    }

    #[test]
    fn input_is_ignored_while_animating() {
        let mut session = session(&[((0, 0), 2), ((3, 0), 2)], ScriptedSpawner::default());

        session.handle_move(Direction::Left).unwrap().unwrap();
        assert_eq!(session.handle_move(Direction::Right).unwrap(), None);

        session.animation_finished();
        assert!(session.handle_move(Direction::Right).unwrap().is_some());
    }

    #[test]
    fn no_op_direction_is_rejected_without_spawning() {
        let mut session = session(&[((0, 0), 2)], ScriptedSpawner::default());

        assert_eq!(session.handle_move(Direction::Left).unwrap(), None);
        assert_eq!(session.engine().iter_tiles().count(), 1);
        assert_eq!(session.phase(), InputPhase::Idle);
    }

    #[test]
    fn win_is_announced_exactly_once() {
        let mut session = session(
            &[((0, 0), 1024), ((1, 0), 1024), ((0, 3), 2)],
            ScriptedSpawner::default(),
        );

        let report = session.handle_move(Direction::Left).unwrap().unwrap();
        assert!(report.won_now);

        session.animation_finished();
        let report = session.handle_move(Direction::Right).unwrap().unwrap();
        assert!(!report.won_now);
    }

    #[test]
    fn restart_restores_the_initial_state() {
        let mut session = session(&[((0, 0), 2), ((3, 0), 2)], ScriptedSpawner::default());
        session.handle_move(Direction::Left).unwrap().unwrap();

        session.restart();

        assert_eq!(session.score(), 0);
        assert_eq!(session.phase(), InputPhase::Idle);
        assert_eq!(session.engine().iter_tiles().count(), 2);
        assert!(session
            .engine()
            .iter_tiles()
            .all(|tile| tile.value() == 2 || tile.value() == 4));
        assert!(!session.is_lost());
        assert!(!session.engine().has_winning_tile());
    }
}
