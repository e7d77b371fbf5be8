//! Session Configuration
//!
//! All parameters are static for the lifetime of a session. Defaults are
//! the shipped game tuning: a 26x20 tile maze, 15% extra-wall removal, a
//! 10-tile detection radius, 300/500 ms movement cadences and a 500 ms
//! replan period during chase.

use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Configuration for a chase session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Grid width in tiles
    pub width: u32,
    /// Grid height in tiles
    pub height: u32,
    /// Fraction of `width * height` extra walls to remove for loops
    pub removal_fraction: f64,
    /// Adversary sensing range, in tile-distance units (Euclidean)
    pub detection_radius: f64,
    /// Milliseconds per adversary step while chasing
    pub chase_interval_ms: u64,
    /// Milliseconds per adversary step while patrolling
    pub patrol_interval_ms: u64,
    /// Milliseconds between path recomputations during chase
    pub replan_interval_ms: u64,
    /// Seed for maze generation and adversary decisions
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 26,
            height: 20,
            removal_fraction: 0.15,
            detection_radius: 10.0,
            chase_interval_ms: 300,
            patrol_interval_ms: 500,
            replan_interval_ms: 500,
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Validate the configuration.
    ///
    /// The simulation layer below the session assumes these invariants; a
    /// collaborator constructing a session must go through this check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if !(0.0..1.0).contains(&self.removal_fraction) {
            return Err(ConfigError::RemovalFractionOutOfRange(self.removal_fraction));
        }
        if self.detection_radius.is_nan() || self.detection_radius < 0.0 {
            return Err(ConfigError::InvalidDetectionRadius(self.detection_radius));
        }
        if self.chase_interval_ms == 0
            || self.patrol_interval_ms == 0
            || self.replan_interval_ms == 0
        {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }
}

/// Errors from [`SimConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Grid has a zero dimension
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid {
        /// Configured width
        width: u32,
        /// Configured height
        height: u32,
    },

    /// Removal fraction outside `[0, 1)`
    #[error("removal fraction must be in [0, 1), got {0}")]
    RemovalFractionOutOfRange(f64),

    /// Detection radius negative or NaN
    #[error("detection radius must be non-negative, got {0}")]
    InvalidDetectionRadius(f64),

    /// A cadence or replan interval is zero
    #[error("movement and replan intervals must be positive")]
    ZeroInterval,
}
