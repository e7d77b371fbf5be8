//! Benchmarks for the simulation hot paths: maze generation,
//! corner-to-corner search and full session ticks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;

use dreadmaze::{
    DeterministicRng, Direction, Maze, SessionState, SimConfig, TilePos, find_path, tick,
};

fn bench_maze_generation(c: &mut Criterion) {
    let seed: u64 = rand::thread_rng().gen();

    c.bench_function("generate_50x50_maze", |b| {
        b.iter(|| {
            let mut rng = DeterministicRng::new(black_box(seed));
            Maze::generate(50, 50, 0.15, &mut rng)
        })
    });
}

fn bench_find_path(c: &mut Criterion) {
    let mut rng = DeterministicRng::new(7);
    let maze = Maze::generate(50, 50, 0.15, &mut rng);

    c.bench_function("find_path_corner_to_corner_50x50", |b| {
        b.iter(|| {
            find_path(
                maze.grid(),
                black_box(TilePos::new(0, 0)),
                black_box(TilePos::new(49, 49)),
            )
        })
    });
}

fn bench_session_ticks(c: &mut Criterion) {
    c.bench_function("session_1000_ticks", |b| {
        b.iter(|| {
            let config = SimConfig {
                seed: 12345,
                ..SimConfig::default()
            };
            let mut state = SessionState::new(config).expect("valid config");
            for step in 0..1000u64 {
                tick(&mut state, Some(Direction::East), step * 120);
            }
            black_box(state.compute_hash())
        })
    });
}

criterion_group!(
    benches,
    bench_maze_generation,
    bench_find_path,
    bench_session_ticks
);
criterion_main!(benches);
