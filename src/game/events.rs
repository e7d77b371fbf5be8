//! Simulation Events
//!
//! Events generated during a tick for the collaborating layers: the HUD
//! shows the adversary mode, the audio layer keys win/lose stingers off the
//! outcome events.

use serde::{Serialize, Deserialize};
use crate::core::tile::TilePos;

/// An observable simulation event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The adversary switched pursuit mode.
    AdversaryModeChanged {
        /// Tick when the transition happened
        tick: u64,
        /// Previous mode label
        from: String,
        /// New mode label
        to: String,
    },

    /// The player reached the exit tile.
    PlayerEscaped {
        /// Tick when the session ended
        tick: u64,
    },

    /// The adversary and the player share a tile.
    PlayerCaught {
        /// Tick when the session ended
        tick: u64,
        /// Tile where the capture happened
        position: TilePos,
    },
}
