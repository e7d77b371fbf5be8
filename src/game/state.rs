//! Session State
//!
//! Everything a running chase session owns: the generated maze, the player
//! and adversary, the session RNG, the phase and the pending events.
//!
//! The maze is generated once at construction and never mutated afterward;
//! the player moves only through [`Grid::can_move`]-gated input, and the
//! adversary mutates nothing but itself.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::TimeMs;
use crate::core::hash::{StateHash, StateHasher};
use crate::core::rng::DeterministicRng;
use crate::core::tile::{TilePos, Direction};
use crate::game::adversary::Adversary;
use crate::game::config::{SimConfig, ConfigError};
use crate::game::events::GameEvent;
use crate::game::grid::Grid;
use crate::game::maze::Maze;

/// Phase of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum SessionPhase {
    /// Simulation advancing normally
    Playing = 0,
    /// Player reached the exit
    Escaped = 1,
    /// Adversary caught the player
    Caught = 2,
}

impl SessionPhase {
    /// Display label for HUD rendering.
    pub fn label(&self) -> &'static str {
        match self {
            SessionPhase::Playing => "PLAYING",
            SessionPhase::Escaped => "ESCAPED",
            SessionPhase::Caught => "CAUGHT",
        }
    }
}

/// State of a single chase session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionState {
    pub(crate) config: SimConfig,
    pub(crate) maze: Maze,
    pub(crate) player: TilePos,
    pub(crate) adversary: Adversary,
    pub(crate) rng: DeterministicRng,
    pub(crate) phase: SessionPhase,
    pub(crate) tick: u64,
    pending_events: Vec<GameEvent>,
}

impl SessionState {
    /// Create a session: validate the config, generate the maze, spawn the
    /// player at the top-left corner and the adversary at the top-right.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = DeterministicRng::new(config.seed);
        let maze = Maze::generate(
            config.width,
            config.height,
            config.removal_fraction,
            &mut rng,
        );
        let adversary = Adversary::new(TilePos::new(config.width as i32 - 1, 0), &config);

        debug!(
            "session created: {}x{} maze, seed {}",
            config.width, config.height, config.seed
        );

        Ok(Self {
            maze,
            player: TilePos::new(0, 0),
            adversary,
            rng,
            phase: SessionPhase::Playing,
            tick: 0,
            pending_events: Vec::new(),
            config,
        })
    }

    /// The session configuration.
    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The generated maze.
    #[inline]
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// The maze grid (read-only after generation).
    #[inline]
    pub fn grid(&self) -> &Grid {
        self.maze.grid()
    }

    /// The exit tile.
    #[inline]
    pub fn exit(&self) -> TilePos {
        self.maze.exit()
    }

    /// The player's tile.
    #[inline]
    pub fn player(&self) -> TilePos {
        self.player
    }

    /// The adversary (position and mode accessors live on it).
    #[inline]
    pub fn adversary(&self) -> &Adversary {
        &self.adversary
    }

    /// The current phase.
    #[inline]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Ticks elapsed since the session started.
    #[inline]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Apply a player move through the grid's movement predicate.
    ///
    /// A blocked or out-of-bounds move is silently rejected; that is
    /// normal control flow, not a failure.
    pub(crate) fn try_move_player(&mut self, dir: Direction) -> bool {
        if self.maze.grid().can_move(self.player, dir) {
            self.player = self.player.step(dir);
            true
        } else {
            false
        }
    }

    /// Run the adversary's AI decision and movement steps.
    pub(crate) fn update_adversary(&mut self, now: TimeMs) {
        // Split borrows: the adversary reads the grid, never the session
        let Self {
            maze,
            adversary,
            rng,
            player,
            ..
        } = self;
        adversary.update_ai(maze.grid(), *player, now, rng);
        adversary.advance(now);
    }

    /// Queue an event for this tick's result.
    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    /// Drain the queued events.
    pub(crate) fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Deterministic hash of the full session state.
    ///
    /// Two sessions built from the same config and fed the same
    /// (input, timestamp) script hash identically; replay verification is
    /// a single comparison.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_session_state();

        hasher.update_u64(self.tick);
        hasher.update_u8(self.phase as u8);
        hasher.update_tile(self.player);
        self.adversary.hash_into(&mut hasher);

        // Grid walls, row-major, four sides packed per cell
        let grid = self.maze.grid();
        hasher.update_u32(grid.width());
        hasher.update_u32(grid.height());
        for y in 0..grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                let pos = TilePos::new(x, y);
                let mut packed = 0u8;
                for dir in Direction::ALL {
                    packed = (packed << 1) | grid.has_wall(pos, dir) as u8;
                }
                hasher.update_u8(packed);
            }
        }

        for word in self.rng.state() {
            hasher.update_u64(word);
        }

        hasher.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::adversary::AdversaryMode;

    #[test]
    fn test_new_session_spawns() {
        let state = SessionState::new(SimConfig::default()).expect("valid config");

        assert_eq!(state.player(), TilePos::new(0, 0));
        assert_eq!(state.adversary().position(), TilePos::new(25, 0));
        assert_eq!(state.exit(), TilePos::new(25, 19));
        assert_eq!(state.phase(), SessionPhase::Playing);
        assert_eq!(state.tick(), 0);
        assert_eq!(state.adversary().mode(), AdversaryMode::Patrol);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SimConfig {
            height: 0,
            ..SimConfig::default()
        };
        assert!(SessionState::new(config).is_err());
    }

    #[test]
    fn test_player_cannot_walk_through_border() {
        let mut state = SessionState::new(SimConfig::default()).expect("valid config");

        // (0, 0) always has boundary walls to the north and west
        assert!(!state.try_move_player(Direction::North));
        assert!(!state.try_move_player(Direction::West));
        assert_eq!(state.player(), TilePos::new(0, 0));
    }

    #[test]
    fn test_hash_is_reproducible() {
        let config = SimConfig {
            seed: 42,
            ..SimConfig::default()
        };
        let state1 = SessionState::new(config.clone()).expect("valid config");
        let state2 = SessionState::new(config).expect("valid config");

        assert_eq!(state1.compute_hash(), state2.compute_hash());
    }

    #[test]
    fn test_hash_differs_across_seeds() {
        let state1 = SessionState::new(SimConfig {
            seed: 1,
            ..SimConfig::default()
        })
        .expect("valid config");
        let state2 = SessionState::new(SimConfig {
            seed: 2,
            ..SimConfig::default()
        })
        .expect("valid config");

        assert_ne!(state1.compute_hash(), state2.compute_hash());
    }

    #[test]
    fn test_hash_tracks_player_movement() {
        let mut state = SessionState::new(SimConfig::default()).expect("valid config");
        let before = state.compute_hash();

        // The carve always opens at least one edge out of the corner
        let moved = state.try_move_player(Direction::South)
            || state.try_move_player(Direction::East);
        assert!(moved);
        assert_ne!(state.compute_hash(), before);
    }
}
