//! # Dreadmaze Simulation Core
//!
//! Deterministic simulation core for Dreadmaze, a tile-grid maze-chase game.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    DREADMAZE CORE                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── tile.rs     - Tile coordinates + cardinal directions    │
//! │  ├── rng.rs      - Deterministic Xorshift128+ PRNG           │
//! │  └── hash.rs     - State hashing for replay verification     │
//! │                                                              │
//! │  game/           - Simulation logic (deterministic)          │
//! │  ├── grid.rs     - Cell/wall model, adjacency queries        │
//! │  ├── maze.rs     - Spanning-tree carve + loop injection      │
//! │  ├── path.rs     - BFS shortest-path search                  │
//! │  ├── adversary.rs- Pursuit finite-state machine              │
//! │  ├── config.rs   - Session parameters + validation           │
//! │  ├── state.rs    - Session state, replay hash                │
//! │  ├── tick.rs     - Per-tick orchestration, replay            │
//! │  └── events.rs   - Events for HUD/audio collaborators        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering, input devices, audio and the outer frame loop are external
//! collaborators: they call [`game::tick::tick`] once per simulated tick
//! and render whatever the read accessors expose.
//!
//! ## Determinism Guarantee
//!
//! The whole crate is **100% deterministic**:
//! - No system time dependencies: timestamps are passed in per tick
//! - All randomness from the seeded Xorshift128+ RNG, explicitly threaded
//! - Integer-exact geometry (tile coordinates, squared distances)
//!
//! Given the same config and the same (input, timestamp) script, a session
//! produces **identical results** on any platform; `compute_hash` reduces
//! the comparison to 32 bytes.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::tile::{TilePos, Direction};
pub use crate::core::rng::DeterministicRng;
pub use crate::core::hash::StateHash;
pub use crate::game::config::{SimConfig, ConfigError};
pub use crate::game::grid::Grid;
pub use crate::game::maze::Maze;
pub use crate::game::path::find_path;
pub use crate::game::adversary::{Adversary, AdversaryMode};
pub use crate::game::state::{SessionState, SessionPhase};
pub use crate::game::tick::{tick, replay_session, TickResult};
pub use crate::game::events::GameEvent;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Caller-supplied timestamp, in milliseconds since session start.
pub type TimeMs = u64;
