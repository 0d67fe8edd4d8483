//! Region manager with spatial indexing.

use hashbrown::HashMap;
use parking_lot::RwLock;
use tracing::trace;
use tunnelbore_core::coords::{RegionPos, WorldPos};
use tunnelbore_core::types::{BlockId, Voxel};

use crate::access::VoxelWorld;
use crate::region::{Region, RegionState};

/// Manages all loaded regions with spatial indexing.
///
/// Provides thread-safe access to regions via `RwLock`.
pub struct RegionManager {
    /// All loaded regions indexed by position.
    regions: RwLock<HashMap<RegionPos, Region>>,
    /// Maximum number of regions to keep loaded.
    max_regions: usize,
    /// Current tick number for LRU tracking.
    current_tick: u64,
}

impl RegionManager {
    /// Create a new region manager with the given capacity.
    pub fn new(max_regions: usize) -> Self {
        Self {
            regions: RwLock::new(HashMap::with_capacity(max_regions)),
            max_regions,
            current_tick: 0,
        }
    }

    /// Get the current tick number.
    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    /// Advance the tick counter and return the new tick number.
    pub fn advance_tick(&mut self) -> u64 {
        self.current_tick += 1;
        self.current_tick
    }

    /// Check if a region exists at the given position.
    pub fn contains(&self, pos: RegionPos) -> bool {
        self.regions.read().contains_key(&pos)
    }

    /// Get the number of loaded regions.
    pub fn len(&self) -> usize {
        self.regions.read().len()
    }

    /// Check if no regions are loaded.
    pub fn is_empty(&self) -> bool {
        self.regions.read().is_empty()
    }

    /// Insert or replace a region at the given position.
    pub fn insert(&self, region: Region) {
        let mut regions = self.regions.write();
        regions.insert(region.pos, region);
    }

    /// Remove a region at the given position.
    pub fn remove(&self, pos: RegionPos) -> Option<Region> {
        let mut regions = self.regions.write();
        regions.remove(&pos)
    }

    /// Execute a function with read access to a region.
    ///
    /// Returns `None` if the region doesn't exist.
    pub fn with_region<F, R>(&self, pos: RegionPos, f: F) -> Option<R>
    where
        F: FnOnce(&Region) -> R,
    {
        let regions = self.regions.read();
        regions.get(&pos).map(f)
    }

    /// Execute a function with write access to a region.
    ///
    /// Returns `None` if the region doesn't exist.
    pub fn with_region_mut<F, R>(&self, pos: RegionPos, f: F) -> Option<R>
    where
        F: FnOnce(&mut Region) -> R,
    {
        let mut regions = self.regions.write();
        regions.get_mut(&pos).map(f)
    }

    /// Read a voxel anywhere in the world, if its region is loaded.
    pub fn voxel_at(&self, pos: WorldPos) -> Option<Voxel> {
        let (region, local) = pos.split();
        self.with_region(region, |r| r.get(local))
    }

    /// Get regions with an open mutation scope.
    pub fn locked_regions(&self) -> Vec<RegionPos> {
        let regions = self.regions.read();
        regions
            .iter()
            .filter(|(_, region)| region.is_locked())
            .map(|(pos, _)| *pos)
            .collect()
    }

    /// Get dirty regions that need persisting.
    pub fn dirty_regions(&self) -> Vec<RegionPos> {
        let regions = self.regions.read();
        regions
            .iter()
            .filter(|(_, region)| region.dirty)
            .map(|(pos, _)| *pos)
            .collect()
    }

    /// Evict oldest regions if over capacity.
    ///
    /// Regions that are generating or locked for mutation are never evicted.
    /// Returns the positions of evicted regions.
    pub fn evict_if_needed(&self) -> Vec<RegionPos> {
        let mut evicted = Vec::new();
        let mut regions = self.regions.write();

        while regions.len() > self.max_regions {
            let oldest = regions
                .iter()
                .filter(|(_, r)| r.state != RegionState::Generating && !r.is_locked())
                .min_by_key(|(_, r)| r.last_access_tick)
                .map(|(pos, _)| *pos);

            if let Some(pos) = oldest {
                regions.remove(&pos);
                evicted.push(pos);
            } else {
                break;
            }
        }

        evicted
    }

    /// Get the maximum region capacity.
    pub fn capacity(&self) -> usize {
        self.max_regions
    }
}

impl Default for RegionManager {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl VoxelWorld for RegionManager {
    type Region = RegionPos;

    fn resolve_region_for_mutation(&self, pos: WorldPos) -> Option<RegionPos> {
        let region = pos.region_pos();
        self.with_region(region, Region::is_available)
            .unwrap_or(false)
            .then_some(region)
    }

    fn read_voxel(&self, region: RegionPos, pos: WorldPos) -> BlockId {
        debug_assert_eq!(pos.region_pos(), region);
        self.with_region(region, |r| r.get(pos.local_pos()).block_id)
            .unwrap_or(BlockId::AIR)
    }

    fn write_voxel(&mut self, region: RegionPos, pos: WorldPos, block: BlockId, metadata: u16) {
        debug_assert_eq!(pos.region_pos(), region);
        let tick = self.current_tick;
        self.with_region_mut(region, |r| {
            r.set(pos.local_pos(), Voxel::with_metadata(block, metadata));
            r.touch(tick);
        });
    }

    fn begin_mutation(&mut self, region: RegionPos) {
        trace!(?region, "begin region mutation");
        self.with_region_mut(region, Region::begin_mutation);
    }

    fn end_mutation(&mut self, region: RegionPos) {
        trace!(?region, "end region mutation");
        self.with_region_mut(region, Region::end_mutation);
    }
}
