//! Region data structure for voxel world storage.

use tunnelbore_core::constants::REGION_SIZE_CUBED;
use tunnelbore_core::coords::{LocalPos, RegionPos};
use tunnelbore_core::types::{BlockId, Voxel};

/// State of a region in the loading pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RegionState {
    /// Region is queued for generation.
    #[default]
    Pending,
    /// Region is currently being generated.
    Generating,
    /// Region has finished its initial generation.
    Generated,
    /// Region has been torn down and must not be touched.
    Destroyed,
}

/// A single region of voxel data (16x16x16 voxels).
pub struct Region {
    /// Position in region coordinates.
    pub pos: RegionPos,
    /// Current state in the loading pipeline.
    pub state: RegionState,
    /// Flat voxel storage, indexed by [`LocalPos::to_index`].
    voxels: Box<[Voxel]>,
    /// Number of open mutation scopes.
    mutation_depth: u32,
    /// Tick when last accessed (for LRU eviction).
    pub last_access_tick: u64,
    /// Whether region changed since the host last persisted it.
    pub dirty: bool,
}

impl Region {
    /// Create a new all-air region waiting for generation.
    pub fn new(pos: RegionPos) -> Self {
        Self {
            pos,
            state: RegionState::Pending,
            voxels: vec![Voxel::AIR; REGION_SIZE_CUBED].into_boxed_slice(),
            mutation_depth: 0,
            last_access_tick: 0,
            dirty: false,
        }
    }

    /// Create a generated region filled with a single block type.
    pub fn filled(pos: RegionPos, block: BlockId) -> Self {
        Self {
            state: RegionState::Generated,
            voxels: vec![Voxel::new(block); REGION_SIZE_CUBED].into_boxed_slice(),
            ..Self::new(pos)
        }
    }

    /// Whether the region may be resolved for mutation.
    pub fn is_available(&self) -> bool {
        self.state == RegionState::Generated
    }

    /// Check if this region is empty (all air).
    pub fn is_empty(&self) -> bool {
        self.voxels.iter().all(Voxel::is_air)
    }

    /// Read the voxel at a local position.
    #[inline]
    pub fn get(&self, local: LocalPos) -> Voxel {
        self.voxels[local.to_index()]
    }

    /// Overwrite the voxel at a local position.
    #[inline]
    pub fn set(&mut self, local: LocalPos, voxel: Voxel) {
        self.voxels[local.to_index()] = voxel;
        self.dirty = true;
    }

    /// Open a mutation scope.
    pub fn begin_mutation(&mut self) {
        self.mutation_depth += 1;
    }

    /// Close a mutation scope. Closing with none open does nothing.
    pub fn end_mutation(&mut self) {
        self.mutation_depth = self.mutation_depth.saturating_sub(1);
    }

    /// Whether any mutation scope is open.
    pub fn is_locked(&self) -> bool {
        self.mutation_depth > 0
    }

    /// Mark the region destroyed.
    pub fn destroy(&mut self) {
        self.state = RegionState::Destroyed;
    }

    /// Update the last access tick for LRU tracking.
    pub fn touch(&mut self, tick: u64) {
        self.last_access_tick = tick;
    }

    /// Count voxels holding `block`.
    pub fn count(&self, block: BlockId) -> usize {
        self.voxels.iter().filter(|v| v.block_id == block).count()
    }
}
