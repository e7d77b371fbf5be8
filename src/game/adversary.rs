//! Adversary Pursuit Logic
//!
//! A finite-state machine deciding what the adversary hunts, and a
//! separately throttled movement step that walks the cached route.
//!
//! The decision step runs once per tick with the player's position and the
//! current timestamp; it never samples a clock or a global RNG itself, so a
//! session replays bit-for-bit from its seed and input script.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::TimeMs;
use crate::core::rng::DeterministicRng;
use crate::core::tile::TilePos;
use crate::game::config::SimConfig;
use crate::game::grid::Grid;
use crate::game::path::find_path;

/// Pursuit mode of the adversary.
///
/// The last-detected player position exists only in the two pursuit modes;
/// `Patrol` cannot carry a stale target by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdversaryMode {
    /// Wandering to random reachable tiles.
    Patrol,
    /// Player inside the detection radius; hunting its live position.
    Chasing {
        /// Player position as of the latest detection
        last_known: TilePos,
    },
    /// Detection lost; heading to where the player was last seen.
    ToLastKnown {
        /// Player position at the moment detection was lost
        last_known: TilePos,
    },
}

impl AdversaryMode {
    /// Display label for HUD rendering.
    pub fn label(&self) -> &'static str {
        match self {
            AdversaryMode::Patrol => "PATROL",
            AdversaryMode::Chasing { .. } => "CHASING",
            AdversaryMode::ToLastKnown { .. } => "TO_LAST_KNOWN",
        }
    }
}

/// The adversary: position, pursuit mode, cached route and movement timers.
///
/// Owns and mutates its own state exclusively; the grid is only ever read.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Adversary {
    position: TilePos,
    mode: AdversaryMode,
    /// Cached route; `path[0]` is the current tile while a route is active.
    path: Vec<TilePos>,
    last_move_at: TimeMs,
    last_replan_at: TimeMs,

    detection_radius: f64,
    chase_interval_ms: TimeMs,
    patrol_interval_ms: TimeMs,
    replan_interval_ms: TimeMs,
}

impl Adversary {
    /// Create an adversary at a spawn tile, tuned by the session config.
    pub fn new(position: TilePos, config: &SimConfig) -> Self {
        Self {
            position,
            mode: AdversaryMode::Patrol,
            path: Vec::new(),
            last_move_at: 0,
            last_replan_at: 0,
            detection_radius: config.detection_radius,
            chase_interval_ms: config.chase_interval_ms,
            patrol_interval_ms: config.patrol_interval_ms,
            replan_interval_ms: config.replan_interval_ms,
        }
    }

    /// Current tile.
    #[inline]
    pub fn position(&self) -> TilePos {
        self.position
    }

    /// Current pursuit mode.
    #[inline]
    pub fn mode(&self) -> AdversaryMode {
        self.mode
    }

    /// The cached route, for debugging or HUD overlays.
    pub fn cached_path(&self) -> &[TilePos] {
        &self.path
    }

    /// Milliseconds per step at the current cadence.
    ///
    /// Chase cadence applies while pursuing (`Chasing` and `ToLastKnown`);
    /// patrol restores the slower interval.
    #[inline]
    fn step_interval(&self) -> TimeMs {
        match self.mode {
            AdversaryMode::Patrol => self.patrol_interval_ms,
            _ => self.chase_interval_ms,
        }
    }

    /// Run one AI decision step.
    ///
    /// Evaluates detection and mode transitions, then tops up the cached
    /// route as the current mode requires. A failed search is not an
    /// error: the adversary simply stands still until the next replan.
    pub fn update_ai(
        &mut self,
        grid: &Grid,
        player: TilePos,
        now: TimeMs,
        rng: &mut DeterministicRng,
    ) {
        let detected = self.position.distance_squared(player) as f64
            <= self.detection_radius * self.detection_radius;

        if detected {
            // A fresh target invalidates the old route, but staying in
            // chase keeps it: the replan interval does the refreshing.
            if !matches!(self.mode, AdversaryMode::Chasing { .. }) {
                self.path.clear();
                debug!("adversary spotted player at {}: {} -> CHASING", player, self.mode.label());
            }
            self.mode = AdversaryMode::Chasing { last_known: player };
        } else if let AdversaryMode::Chasing { last_known } = self.mode {
            debug!("adversary lost player, heading to {}", last_known);
            self.mode = AdversaryMode::ToLastKnown { last_known };
            self.path.clear();
        } else if let AdversaryMode::ToLastKnown { last_known } = self.mode {
            if self.position == last_known {
                debug!("adversary reached last known position {}, resuming patrol", last_known);
                self.mode = AdversaryMode::Patrol;
                self.path.clear();
            }
        }

        match self.mode {
            AdversaryMode::Chasing { last_known } => {
                let replan_due =
                    now.saturating_sub(self.last_replan_at) > self.replan_interval_ms;
                if self.path.is_empty() || replan_due {
                    self.path = find_path(grid, self.position, last_known).unwrap_or_default();
                    self.last_replan_at = now;
                }
            }
            AdversaryMode::ToLastKnown { last_known } => {
                // Target is static until reached; one plan is enough
                if self.path.is_empty() {
                    self.path = find_path(grid, self.position, last_known).unwrap_or_default();
                }
            }
            AdversaryMode::Patrol => {
                if self.path.is_empty() {
                    let target = TilePos::new(
                        rng.next_int(grid.width()) as i32,
                        rng.next_int(grid.height()) as i32,
                    );
                    // On a connected grid this always succeeds; an empty
                    // result just means a retry on the next update
                    self.path = find_path(grid, self.position, target).unwrap_or_default();
                }
            }
        }
    }

    /// Run one movement step.
    ///
    /// Advances one waypoint along the cached route when the cadence
    /// interval has elapsed. The cadence timestamp advances whether or not
    /// a waypoint was available, so an adversary that was starved of a
    /// route does not burst forward the moment one arrives. Returns whether
    /// a step was taken.
    pub fn advance(&mut self, now: TimeMs) -> bool {
        if now.saturating_sub(self.last_move_at) <= self.step_interval() {
            return false;
        }
        self.last_move_at = now;

        if self.path.len() > 1 {
            self.path.remove(0);
            self.position = self.path[0];
            true
        } else {
            self.path.clear();
            false
        }
    }

    /// Feed every replay-relevant field into a state hasher.
    pub(crate) fn hash_into(&self, hasher: &mut crate::core::hash::StateHasher) {
        hasher.update_tile(self.position);

        match self.mode {
            AdversaryMode::Patrol => hasher.update_u8(0),
            AdversaryMode::Chasing { last_known } => {
                hasher.update_u8(1);
                hasher.update_tile(last_known);
            }
            AdversaryMode::ToLastKnown { last_known } => {
                hasher.update_u8(2);
                hasher.update_tile(last_known);
            }
        }

        hasher.update_u64(self.path.len() as u64);
        for waypoint in &self.path {
            hasher.update_tile(*waypoint);
        }

        hasher.update_u64(self.last_move_at);
        hasher.update_u64(self.last_replan_at);
    }
}
