//! Coordinate systems for the voxel world.

use crate::constants::{REGION_BITS, REGION_SIZE};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Position within a region (0 to REGION_SIZE-1 per axis).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct LocalPos {
    pub x: u8,
    pub y: u8,
    pub z: u8,
    pub _pad: u8,
}

impl LocalPos {
    /// Create a new local position
    #[inline]
    pub const fn new(x: u8, y: u8, z: u8) -> Self {
        debug_assert!((x as usize) < REGION_SIZE);
        debug_assert!((y as usize) < REGION_SIZE);
        debug_assert!((z as usize) < REGION_SIZE);
        Self { x, y, z, _pad: 0 }
    }

    /// Convert to linear index for flat array storage
    #[inline]
    pub const fn to_index(self) -> usize {
        self.x as usize
            + (self.y as usize) * REGION_SIZE
            + (self.z as usize) * REGION_SIZE * REGION_SIZE
    }
}

/// Region position in region coordinates.
///
/// Holds the full `i64` range so every world coordinate has its own region.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct RegionPos {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl RegionPos {
    /// Create a new region position
    #[inline]
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }
}

/// World position in voxel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl WorldPos {
    /// Create a new world position
    #[inline]
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Get the region containing this position
    #[inline]
    pub const fn region_pos(self) -> RegionPos {
        RegionPos::new(
            self.x >> REGION_BITS,
            self.y >> REGION_BITS,
            self.z >> REGION_BITS,
        )
    }

    /// Get the local position within the region
    #[inline]
    pub const fn local_pos(self) -> LocalPos {
        let mask = (REGION_SIZE - 1) as i64;
        LocalPos::new(
            (self.x & mask) as u8,
            (self.y & mask) as u8,
            (self.z & mask) as u8,
        )
    }

    /// Split into region and local position
    #[inline]
    pub const fn split(self) -> (RegionPos, LocalPos) {
        (self.region_pos(), self.local_pos())
    }

    /// Create from region and local position
    #[inline]
    pub const fn from_region_local(region: RegionPos, local: LocalPos) -> Self {
        Self::new(
            (region.x << REGION_BITS) + local.x as i64,
            (region.y << REGION_BITS) + local.y as i64,
            (region.z << REGION_BITS) + local.z as i64,
        )
    }

    /// Component-wise sum, or `None` if any axis leaves the `i64` range.
    #[inline]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match (
            self.x.checked_add(rhs.x),
            self.y.checked_add(rhs.y),
            self.z.checked_add(rhs.z),
        ) {
            (Some(x), Some(y), Some(z)) => Some(Self::new(x, y, z)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_pos_region_local_roundtrip() {
        let world = WorldPos::new(100, -50, 200);
        let (region, local) = world.split();
        let recovered = WorldPos::from_region_local(region, local);
        assert_eq!(world, recovered);
    }

    #[test]
    fn negative_world_pos_region() {
        let world = WorldPos::new(-1, -1, -1);
        let region = world.region_pos();
        assert_eq!(region, RegionPos::new(-1, -1, -1));
        assert_eq!(world.local_pos(), LocalPos::new(15, 15, 15));
    }

    #[test]
    fn world_pos_checked_add() {
        let sum = WorldPos::new(1, 2, 3).checked_add(WorldPos::new(-4, 0, 10));
        assert_eq!(sum, Some(WorldPos::new(-3, 2, 13)));
        assert_eq!(
            WorldPos::new(i64::MAX - 1, 0, 0).checked_add(WorldPos::new(2, 0, 0)),
            None
        );
        assert_eq!(
            WorldPos::new(0, 0, i64::MIN).checked_add(WorldPos::new(0, 0, -1)),
            None
        );
    }

    #[test]
    fn far_coordinates_keep_their_region() {
        let far = WorldPos::new(1 << 40, -(1 << 50), i64::MAX);
        let (region, local) = far.split();
        assert_eq!(region, RegionPos::new(1 << 36, -(1 << 46), i64::MAX >> 4));
        assert_ne!(region, RegionPos::new(0, 0, 0));
        assert_eq!(WorldPos::from_region_local(region, local), far);
    }
}
