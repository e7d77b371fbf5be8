//! Simulation Logic Module
//!
//! All simulation code. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `grid`: cell/wall data model and adjacency queries
//! - `maze`: spanning-tree carve + loop injection
//! - `path`: breadth-first shortest-path search
//! - `adversary`: pursuit finite-state machine
//! - `config`: session parameters and validation
//! - `state`: session state and replay hashing
//! - `tick`: per-tick orchestration
//! - `events`: observable events for HUD/audio collaborators

pub mod grid;
pub mod maze;
pub mod path;
pub mod adversary;
pub mod config;
pub mod state;
pub mod tick;
pub mod events;

// Re-export key types
pub use grid::{Grid, Cell};
pub use maze::Maze;
pub use path::find_path;
pub use adversary::{Adversary, AdversaryMode};
pub use config::{SimConfig, ConfigError};
pub use state::{SessionState, SessionPhase};
pub use tick::{tick, replay_session, TickResult};
pub use events::GameEvent;
