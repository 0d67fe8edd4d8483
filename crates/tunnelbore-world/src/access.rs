//! The world interface consumed by the bore and its scoped lock helper.

use std::fmt::Debug;

use tunnelbore_core::{BlockId, WorldPos};

/// Narrow view of a host voxel world.
///
/// Implementations own region lifecycle and locking. Resolving a coordinate
/// that lies in unloaded, ungenerated or destroyed space yields `None`, never
/// an error.
pub trait VoxelWorld {
    /// Opaque handle to a lockable region of voxel storage.
    type Region: Copy + Eq + Debug;

    /// Resolve the region containing `pos`, if it can be mutated right now.
    fn resolve_region_for_mutation(&self, pos: WorldPos) -> Option<Self::Region>;

    /// Read the block at `pos` inside `region`.
    fn read_voxel(&self, region: Self::Region, pos: WorldPos) -> BlockId;

    /// Overwrite the block at `pos` inside `region`.
    fn write_voxel(&mut self, region: Self::Region, pos: WorldPos, block: BlockId, metadata: u16);

    /// Open `region` for mutation.
    fn begin_mutation(&mut self, region: Self::Region);

    /// Close `region` after mutation. Closing an unopened region is a no-op.
    fn end_mutation(&mut self, region: Self::Region);
}

/// Regions opened for mutation during one activation.
///
/// Regions are opened lazily, the first time they are written, and kept in
/// insertion order. Every opened region is closed exactly once when the guard
/// is dropped, whichever way the activation ends.
pub struct TouchedRegions<'w, W: VoxelWorld + ?Sized> {
    world: &'w mut W,
    touched: Vec<W::Region>,
}

impl<'w, W: VoxelWorld + ?Sized> TouchedRegions<'w, W> {
    /// Start tracking regions opened against `world`.
    pub fn new(world: &'w mut W) -> Self {
        Self {
            world,
            touched: Vec::new(),
        }
    }

    /// Run `f` with a fresh guard and release every region it opened.
    pub fn scope<R>(world: &'w mut W, f: impl FnOnce(&mut Self) -> R) -> R {
        let mut regions = Self::new(world);
        f(&mut regions)
    }

    /// Read-only access to the underlying world.
    pub fn world(&self) -> &W {
        self.world
    }

    /// Open `region` unless it is already open in this scope.
    pub fn open(&mut self, region: W::Region) {
        if !self.touched.contains(&region) {
            self.world.begin_mutation(region);
            self.touched.push(region);
        }
    }

    /// Open `region` if needed, then write `block` at `pos`.
    pub fn write_voxel(&mut self, region: W::Region, pos: WorldPos, block: BlockId, metadata: u16) {
        self.open(region);
        self.world.write_voxel(region, pos, block, metadata);
    }

    /// Regions opened so far, in the order they were first touched.
    pub fn touched(&self) -> &[W::Region] {
        &self.touched
    }
}

impl<W: VoxelWorld + ?Sized> Drop for TouchedRegions<'_, W> {
    fn drop(&mut self) {
        for region in self.touched.drain(..) {
            self.world.end_mutation(region);
        }
    }
}
