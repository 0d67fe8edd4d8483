//! Replicated machine state.
//!
//! The snapshot is three little-endian `i32`s, `[state][distance][max]`,
//! identical on write and read.

use serde::{Deserialize, Serialize};
use tunnelbore_core::{Error, Result};

use crate::state::BoreState;

/// Encoded snapshot length in bytes.
pub const SNAPSHOT_LEN: usize = 12;

/// State mirrored from the authoritative machine to its replicas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoreSnapshot {
    /// [`BoreState::wire_value`] of the machine state.
    pub state: i32,
    /// Current bore distance.
    pub bore_distance: i32,
    /// Configured maximum distance.
    pub max_bore_distance: i32,
}

impl BoreSnapshot {
    /// Build a snapshot from live values.
    pub const fn new(state: BoreState, bore_distance: i32, max_bore_distance: i32) -> Self {
        Self {
            state: state.wire_value(),
            bore_distance,
            max_bore_distance,
        }
    }

    /// Decoded machine state.
    pub fn bore_state(&self) -> Result<BoreState> {
        BoreState::from_wire(self.state)
    }

    /// Encode to the fixed 12-byte layout.
    pub fn encode(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Decode from the fixed 12-byte layout, rejecting unknown states.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SNAPSHOT_LEN {
            return Err(Error::InvalidSnapshot(format!(
                "expected {SNAPSHOT_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        let snapshot: Self =
            bincode::deserialize(bytes).map_err(|e| Error::Serialization(e.to_string()))?;
        snapshot.bore_state()?;
        Ok(snapshot)
    }
}
