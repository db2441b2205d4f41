use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::hint::black_box;
use yonhachi_core::{Direction, GameConfig, PlayEngine, RandomTileSpawner};

/// Deterministic boards of varying density, derived by playing forward from
/// a seeded start.
fn corpus() -> Vec<PlayEngine> {
    let mut engine = PlayEngine::new(GameConfig::default(), RandomTileSpawner::new(42));
    let mut boards = vec![engine.clone()];
    let seq = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];
    for i in 0..40 {
        let direction = seq[i % seq.len()];
        if engine.can_move(direction) {
            engine.apply_move(direction).unwrap();
            engine.spawn_tile().ok();
        }
        boards.push(engine.clone());
    }
    boards
}

fn bench_can_move(c: &mut Criterion) {
    let boards = corpus();
    c.bench_function("can_move/all_directions", |b| {
        b.iter(|| {
            let mut acc = 0usize;
            for engine in &boards {
                for direction in Direction::ALL {
                    acc += usize::from(engine.can_move(direction));
                }
            }
            black_box(acc)
        })
    });
}

fn bench_apply_move(c: &mut Criterion) {
    let boards = corpus();
    c.bench_function("apply_move/first_legal", |b| {
        b.iter_batched(
            || boards.clone(),
            |mut boards| {
                for engine in &mut boards {
                    for direction in Direction::ALL {
                        if engine.can_move(direction) {
                            engine.apply_move(direction).unwrap();
                            break;
                        }
                    }
                }
                boards
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_can_move, bench_apply_move);
criterion_main!(benches);
