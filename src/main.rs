//! Dreadmaze Headless Demo
//!
//! Plays the external collaborator's role against the simulation core:
//! drives a scripted session tick by tick, renders the maze as ASCII and
//! verifies that replaying the recorded script reproduces the exact state.

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use dreadmaze::{
    SimConfig, SessionState, SessionPhase, Direction, TilePos, TimeMs, VERSION,
    find_path, tick, replay_session, GameEvent,
};

/// Wall-clock milliseconds the demo pretends pass between ticks.
const TICK_INTERVAL_MS: TimeMs = 120;

fn main() {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Dreadmaze Simulation Core v{}", VERSION);

    demo_session();
}

/// Run a scripted session and verify replay determinism.
fn demo_session() {
    info!("=== Starting Demo Session ===");

    let config = SimConfig {
        seed: 12345,
        ..SimConfig::default()
    };
    info!(
        "Maze: {}x{}, seed {}, detection radius {}",
        config.width, config.height, config.seed, config.detection_radius
    );

    let mut state = SessionState::new(config.clone()).expect("default config is valid");
    info!("Maze layout:\n{}", render_maze(&state));

    let max_ticks = (config.width as u64) * (config.height as u64) * 4;
    let mut script: Vec<(Option<Direction>, TimeMs)> = Vec::new();

    for step in 0..max_ticks {
        let now = step * TICK_INTERVAL_MS;
        let input = next_player_move(&state);
        script.push((input, now));

        let result = tick(&mut state, input, now);

        for event in &result.events {
            match event {
                GameEvent::AdversaryModeChanged { tick, from, to } => {
                    info!("tick {}: adversary {} -> {}", tick, from, to);
                }
                GameEvent::PlayerEscaped { tick } => {
                    info!("tick {}: player escaped!", tick);
                }
                GameEvent::PlayerCaught { tick, position } => {
                    info!("tick {}: player caught at {}", tick, position);
                }
            }
        }

        if result.phase != SessionPhase::Playing {
            break;
        }
    }

    info!("=== Session Results ===");
    info!("Outcome: {}", state.phase().label());
    info!(
        "Player: {}, Adversary: {} ({})",
        state.player(),
        state.adversary().position(),
        state.adversary().mode().label()
    );

    let hash = state.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));

    // Verify determinism by replaying the recorded script
    info!("=== Verifying Determinism ===");
    let (replay_final, _) = replay_session(config, &script).expect("config validated above");
    let replay_hash = replay_final.compute_hash();
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash == replay_hash {
        info!("DETERMINISM VERIFIED: Hashes match!");
    } else {
        info!("DETERMINISM FAILURE: Hashes differ!");
    }
}

/// Scripted player policy: one step along the current shortest route to
/// the exit, replanned every tick.
fn next_player_move(state: &SessionState) -> Option<Direction> {
    let route = find_path(state.grid(), state.player(), state.exit())?;
    let next = *route.get(1)?;
    Direction::ALL
        .into_iter()
        .find(|dir| state.player().step(*dir) == next)
}

/// Render the maze with player (P), adversary (A) and exit (E) markers.
fn render_maze(state: &SessionState) -> String {
    let grid = state.grid();
    let mut out = String::new();

    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            out.push('+');
            if grid.has_wall(TilePos::new(x, y), Direction::North) {
                out.push_str("--");
            } else {
                out.push_str("  ");
            }
        }
        out.push_str("+\n");

        for x in 0..grid.width() as i32 {
            let pos = TilePos::new(x, y);
            if grid.has_wall(pos, Direction::West) {
                out.push('|');
            } else {
                out.push(' ');
            }
            out.push_str(tile_marker(state, pos));
        }
        out.push_str("|\n");
    }

    for _ in 0..grid.width() {
        out.push_str("+--");
    }
    out.push('+');
    out
}

/// Two-character marker for a tile's occupant.
fn tile_marker(state: &SessionState, pos: TilePos) -> &'static str {
    if pos == state.player() {
        "P "
    } else if pos == state.adversary().position() {
        "A "
    } else if pos == state.exit() {
        "E "
    } else {
        "  "
    }
}
