//! Builder for small in-memory worlds.

use tunnelbore_core::{BlockId, RegionPos, Voxel, WorldPos};
use tunnelbore_world::{Region, RegionManager};

/// Assembles a [`RegionManager`] region by region.
///
/// Later calls override earlier ones, so a solid box can be punched with
/// unavailable regions or single voxels afterwards.
pub struct WorldBuilder {
    manager: RegionManager,
}

impl WorldBuilder {
    /// Start from an empty world with nothing loaded.
    pub fn new() -> Self {
        Self {
            manager: RegionManager::default(),
        }
    }

    /// Load every region overlapping the box `min..=max`, filled with `block`.
    pub fn solid(self, min: WorldPos, max: WorldPos, block: BlockId) -> Self {
        let lo = min.region_pos();
        let hi = max.region_pos();
        for x in lo.x..=hi.x {
            for y in lo.y..=hi.y {
                for z in lo.z..=hi.z {
                    self.manager
                        .insert(Region::filled(RegionPos::new(x, y, z), block));
                }
            }
        }
        self
    }

    /// Replace the region containing `pos` with one still waiting for generation.
    pub fn pending(self, pos: WorldPos) -> Self {
        self.manager.insert(Region::new(pos.region_pos()));
        self
    }

    /// Mark the region containing `pos` destroyed.
    pub fn destroyed(self, pos: WorldPos) -> Self {
        self.manager.with_region_mut(pos.region_pos(), Region::destroy);
        self
    }

    /// Unload the region containing `pos`.
    pub fn unloaded(self, pos: WorldPos) -> Self {
        self.manager.remove(pos.region_pos());
        self
    }

    /// Overwrite one voxel in an already loaded region.
    pub fn block(self, pos: WorldPos, block: BlockId) -> Self {
        let (region, local) = pos.split();
        self.manager
            .with_region_mut(region, |r| r.set(local, Voxel::new(block)));
        self
    }

    /// Finish, clearing dirty flags so only later writes show up.
    pub fn build(self) -> RegionManager {
        for pos in self.manager.dirty_regions() {
            self.manager.with_region_mut(pos, |r| r.dirty = false);
        }
        self.manager
    }
}

impl Default for WorldBuilder {
    fn default() -> Self {
        Self::new()
    }
}
