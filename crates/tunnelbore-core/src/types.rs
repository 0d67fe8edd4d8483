//! Core voxel types.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Unique identifier for a block type.
///
/// Block ID 0 is reserved for air (empty space).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct BlockId(pub u16);

impl BlockId {
    /// Air block (empty space)
    pub const AIR: Self = Self(0);
    /// Stone block
    pub const STONE: Self = Self(1);
    /// Dirt block
    pub const DIRT: Self = Self(2);
    /// Grass block
    pub const GRASS: Self = Self(3);
    /// Snow block
    pub const SNOW: Self = Self(4);
    /// Sand block
    pub const SAND: Self = Self(5);
    /// Water block
    pub const WATER: Self = Self(6);
    /// Tree log block
    pub const LOG: Self = Self(7);
    /// Tree leaves block
    pub const LEAVES: Self = Self(8);
    /// Flower block
    pub const FLOWER: Self = Self(9);
    /// Gravel block
    pub const GRAVEL: Self = Self(10);
    /// Ore vein, left for miners
    pub const ORE: Self = Self(11);
    /// Placed machine block
    pub const MACHINE: Self = Self(12);
    /// The tunnel bore itself
    pub const TUNNEL_BORE: Self = Self(600);

    /// Returns true if this block is air (empty)
    #[inline]
    pub const fn is_air(self) -> bool {
        self.0 == 0
    }

    /// Returns true for natural terrain that a bore may turn into air.
    ///
    /// Air, fluids, ore and placed machines are all left untouched.
    #[inline]
    pub const fn is_excavatable(self) -> bool {
        matches!(
            self,
            Self::STONE
                | Self::DIRT
                | Self::GRASS
                | Self::SNOW
                | Self::SAND
                | Self::LOG
                | Self::LEAVES
                | Self::FLOWER
                | Self::GRAVEL
        )
    }
}

/// A single voxel with block type and optional metadata.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct Voxel {
    /// The block type
    pub block_id: BlockId,
    /// Additional metadata (orientation, state, etc.)
    pub metadata: u16,
}

impl Voxel {
    /// Air voxel
    pub const AIR: Self = Self {
        block_id: BlockId::AIR,
        metadata: 0,
    };

    /// Create a new voxel with the given block ID
    #[inline]
    pub const fn new(block_id: BlockId) -> Self {
        Self {
            block_id,
            metadata: 0,
        }
    }

    /// Create a new voxel with block ID and metadata
    #[inline]
    pub const fn with_metadata(block_id: BlockId, metadata: u16) -> Self {
        Self { block_id, metadata }
    }

    /// Returns true if this voxel is air
    #[inline]
    pub const fn is_air(&self) -> bool {
        self.block_id.is_air()
    }
}
