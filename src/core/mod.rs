//! Core deterministic primitives.
//!
//! All types in this module are designed for perfect cross-platform
//! determinism. They form the foundation the simulation layer is built on.

pub mod tile;
pub mod rng;
pub mod hash;

// Re-export core types
pub use tile::{TilePos, Direction};
pub use rng::DeterministicRng;
pub use hash::{StateHash, StateHasher};
