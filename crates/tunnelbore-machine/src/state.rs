//! Machine lifecycle, bore progress and the excavation cooldown.

use std::fmt;

use tunnelbore_core::{Error, Result};

/// Lifecycle state of a tunnel bore.
///
/// Discriminants are the values carried in network snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum BoreState {
    /// Not enough energy to clear a single voxel.
    LowPower = 0,
    /// Excavating on the cooldown schedule.
    Boring = 1,
    /// Maximum distance passed. Terminal.
    Finished = 2,
    /// Placed but not yet evaluated.
    Initializing = 3,
}

impl BoreState {
    /// Snapshot encoding.
    #[inline]
    pub const fn wire_value(self) -> i32 {
        self as i32
    }

    /// Decode a snapshot value.
    pub fn from_wire(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Self::LowPower),
            1 => Ok(Self::Boring),
            2 => Ok(Self::Finished),
            3 => Ok(Self::Initializing),
            other => Err(Error::InvalidSnapshot(format!("unknown bore state {other}"))),
        }
    }

    /// State for the next tick.
    ///
    /// `Initializing` always steps to `LowPower`; `Finished` never changes.
    #[must_use]
    pub fn next(self, distance: i32, max_distance: i32, energy: f32, cost_per_voxel: f32) -> Self {
        match self {
            Self::Finished => Self::Finished,
            Self::Initializing => Self::LowPower,
            _ if distance > max_distance => Self::Finished,
            _ if energy > cost_per_voxel => Self::Boring,
            _ => Self::LowPower,
        }
    }
}

impl fmt::Display for BoreState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LowPower => "LowPower",
            Self::Boring => "Boring",
            Self::Finished => "Finished",
            Self::Initializing => "Initializing",
        };
        f.write_str(name)
    }
}

/// How far the tunnel has advanced along the frame's forward axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoreProgress {
    distance: i32,
    max_distance: i32,
}

impl BoreProgress {
    /// Fresh progress at distance 1.
    pub const fn new(max_distance: i32) -> Self {
        Self {
            distance: 1,
            max_distance,
        }
    }

    /// Distance of the next cross-section to cut.
    #[inline]
    pub const fn distance(&self) -> i32 {
        self.distance
    }

    /// Last distance that will be cut.
    #[inline]
    pub const fn max_distance(&self) -> i32 {
        self.max_distance
    }

    /// Whether the tunnel is complete.
    #[inline]
    pub const fn is_exhausted(&self) -> bool {
        self.distance > self.max_distance
    }

    /// Step one cell forward.
    pub fn advance(&mut self) {
        self.distance += 1;
    }

    /// Discard progress along the old axis.
    pub fn reset(&mut self) {
        self.distance = 1;
    }

    /// Overwrite both values from a snapshot.
    pub fn mirror(&mut self, distance: i32, max_distance: i32) {
        self.distance = distance;
        self.max_distance = max_distance;
    }
}

/// Cooldown that lets one excavation pass through every `threshold` ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SleepCounter {
    count: u32,
    threshold: u32,
}

impl SleepCounter {
    /// Create a counter that fires on every `threshold`th tick.
    pub const fn new(threshold: u32) -> Self {
        Self {
            count: 0,
            threshold,
        }
    }

    /// Ticks counted since the last pass.
    #[inline]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Count one tick. Returns true, and starts over, when the threshold is hit.
    pub fn tick(&mut self) -> bool {
        self.count += 1;
        if self.count < self.threshold {
            return false;
        }
        self.count = 0;
        true
    }
}
