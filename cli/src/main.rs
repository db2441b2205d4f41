use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use yonhachi_core::{
    Coord, Direction, GameConfig, GameSession, PlayEngine, RandomTileSpawner, Score, ScoreBoard,
    TileValue, TurnReport, DEFAULT_GRID_SIZE, WINNING_TILE_VALUE,
};

#[derive(Debug, Parser)]
#[command(name = "yonhachi", about = "Sliding-tile merge puzzle in the terminal")]
struct Args {
    /// Grid size (N for an N×N board)
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    size: Coord,

    /// Tile value that wins the game
    #[arg(long, default_value_t = WINNING_TILE_VALUE)]
    win_value: TileValue,

    /// Seed for the spawn randomness; defaults to the clock
    #[arg(long)]
    seed: Option<u64>,

    /// Leaderboard file
    #[arg(long, default_value = "yonhachi-scores.json")]
    scores: PathBuf,

    #[command(flatten)]
    verbosity: clap_verbosity_flag::Verbosity,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(clock_seed);
    log::info!("starting with seed {seed}");

    let config = GameConfig::new(args.size, args.win_value);
    let engine = PlayEngine::new(config, RandomTileSpawner::new(seed));
    let mut session = GameSession::new(engine);
    let mut leaders = load_scores(&args.scores)?;

    println!("w/a/s/d move, n new game, q quit");
    print_board(&session)?;

    // Set once the current game's score has been ranked, so a finished game
    // is never recorded twice.
    let mut recorded = false;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading input")?;
        match line.trim() {
            "" => continue,
            "q" | "quit" => break,
            "n" | "new" => {
                if !recorded {
                    record_score(&mut leaders, session.score(), &args.scores)?;
                }
                session.restart();
                recorded = false;
                print_board(&session)?;
            }
            command => {
                let Some(direction) = parse_direction(command) else {
                    println!("w/a/s/d move, n new game, q quit");
                    continue;
                };
                if session.is_lost() {
                    println!("game over, n for a new game or q to quit");
                    continue;
                }
                if let Some(report) = session.handle_move(direction)? {
                    // No animations in a terminal; the turn completes at once.
                    session.animation_finished();
                    print_board(&session)?;
                    report_turn(&report, &session);
                    if report.lost {
                        record_score(&mut leaders, session.score(), &args.scores)?;
                        recorded = true;
                        print_leaders(&leaders);
                    }
                } else {
                    println!("nothing moves that way");
                }
            }
        }
    }

    if !recorded {
        record_score(&mut leaders, session.score(), &args.scores)?;
    }
    print_leaders(&leaders);
    Ok(())
}

fn parse_direction(command: &str) -> Option<Direction> {
    match command {
        "w" | "up" => Some(Direction::Up),
        "s" | "down" => Some(Direction::Down),
        "a" | "left" => Some(Direction::Left),
        "d" | "right" => Some(Direction::Right),
        _ => None,
    }
}

fn report_turn(report: &TurnReport, session: &GameSession) {
    log::debug!(
        "spawned {} at {:?}",
        report.spawned.value(),
        report.spawned.coords()
    );
    if report.won_now {
        println!(
            "you won! tile {} reached, {} points so far, keep going or press n",
            session.engine().config().winning_value,
            session.score()
        );
    }
    if report.lost {
        println!("game over! {} points earned", session.score());
    }
}

fn print_board(session: &GameSession) -> Result<()> {
    let engine = session.engine();
    let size = engine.size();
    for y in 0..size {
        for x in 0..size {
            match engine.tile_at((x, y))? {
                Some(tile) => print!("{:>6}", tile.value()),
                None => print!("{:>6}", "."),
            }
        }
        println!();
    }
    println!("score: {}", session.score());
    Ok(())
}

fn print_leaders(leaders: &ScoreBoard) {
    println!("best scores:");
    for (rank, score) in leaders.entries().iter().enumerate() {
        println!("{:>3}. {}", rank + 1, score);
    }
}

fn record_score(leaders: &mut ScoreBoard, score: Score, path: &Path) -> Result<()> {
    if leaders.record(score) {
        log::info!("score {score} made the board");
    }
    save_scores(path, leaders)
}

fn load_scores(path: &Path) -> Result<ScoreBoard> {
    match fs::read_to_string(path) {
        Ok(text) => {
            let entries: Vec<Score> = serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?;
            Ok(ScoreBoard::from_entries(entries))
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(ScoreBoard::new()),
        Err(err) => Err(err).context(format!("reading {}", path.display())),
    }
}

fn save_scores(path: &Path, leaders: &ScoreBoard) -> Result<()> {
    let text = serde_json::to_string(leaders)?;
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}
