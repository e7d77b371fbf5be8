//! State Hashing for Replay Verification
//!
//! Provides deterministic hashing of session state so a replayed session
//! can be compared against the original run with a single equality check.

use sha2::{Sha256, Digest};
use super::tile::TilePos;

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher for simulation state.
///
/// Wraps SHA-256 with helpers for the simulation's field types.
/// Order of updates is critical for determinism.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for session state.
    pub fn for_session_state() -> Self {
        Self::new(b"DREADMAZE_STATE_V1")
    }

    /// Update with raw bytes.
    #[inline]
    pub fn update_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a u64 value (little-endian).
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an i32 value (little-endian).
    #[inline]
    pub fn update_i32(&mut self, value: i32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Update with a tile position.
    #[inline]
    pub fn update_tile(&mut self, value: TilePos) {
        self.update_i32(value.x);
        self.update_i32(value.y);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_updates_same_hash() {
        let mut h1 = StateHasher::for_session_state();
        let mut h2 = StateHasher::for_session_state();

        for h in [&mut h1, &mut h2] {
            h.update_u64(42);
            h.update_tile(TilePos::new(3, 4));
            h.update_bool(true);
        }

        assert_eq!(h1.finalize(), h2.finalize());
    }

    #[test]
    fn test_order_matters() {
        let mut h1 = StateHasher::for_session_state();
        h1.update_u8(1);
        h1.update_u8(2);

        let mut h2 = StateHasher::for_session_state();
        h2.update_u8(2);
        h2.update_u8(1);

        assert_ne!(h1.finalize(), h2.finalize());
    }

    #[test]
    fn test_domain_separation() {
        let mut h1 = StateHasher::new(b"DOMAIN_A");
        let mut h2 = StateHasher::new(b"DOMAIN_B");
        h1.update_u64(7);
        h2.update_u64(7);

        assert_ne!(h1.finalize(), h2.finalize());
    }
}
