//! World wrapper that records calls made through the world interface.

use std::cell::Cell;

use tunnelbore_core::{BlockId, WorldPos};
use tunnelbore_world::VoxelWorld;

/// One mutating call made through [`VoxelWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldCall<R> {
    Write(R, WorldPos, BlockId),
    Begin(R),
    End(R),
}

/// Delegates to an inner world and keeps a journal of every call.
pub struct RecordingWorld<W: VoxelWorld> {
    inner: W,
    calls: Vec<WorldCall<W::Region>>,
    resolves: Cell<usize>,
}

impl<W: VoxelWorld> RecordingWorld<W> {
    /// Wrap `inner`.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            calls: Vec::new(),
            resolves: Cell::new(0),
        }
    }

    /// The wrapped world.
    pub fn inner(&self) -> &W {
        &self.inner
    }

    /// Mutating calls in order: writes, begins and ends.
    pub fn calls(&self) -> &[WorldCall<W::Region>] {
        &self.calls
    }

    /// Number of resolve calls.
    pub fn resolve_count(&self) -> usize {
        self.resolves.get()
    }

    /// Positions written, in order.
    pub fn writes(&self) -> Vec<WorldPos> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                WorldCall::Write(_, pos, _) => Some(*pos),
                _ => None,
            })
            .collect()
    }

    /// Regions opened but not yet closed.
    pub fn open_regions(&self) -> Vec<W::Region> {
        let mut open = Vec::new();
        for call in &self.calls {
            match call {
                WorldCall::Begin(region) => open.push(*region),
                WorldCall::End(region) => {
                    if let Some(index) = open.iter().position(|r| r == region) {
                        open.remove(index);
                    }
                }
                _ => {}
            }
        }
        open
    }

    /// Whether every write happened inside an open scope for its region.
    pub fn writes_were_scoped(&self) -> bool {
        let mut open = Vec::new();
        for call in &self.calls {
            match call {
                WorldCall::Begin(region) => open.push(*region),
                WorldCall::End(region) => open.retain(|r| r != region),
                WorldCall::Write(region, _, _) if !open.contains(region) => return false,
                _ => {}
            }
        }
        true
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.calls.clear();
        self.resolves.set(0);
    }
}

impl<W: VoxelWorld> VoxelWorld for RecordingWorld<W> {
    type Region = W::Region;

    fn resolve_region_for_mutation(&self, pos: WorldPos) -> Option<Self::Region> {
        self.resolves.set(self.resolves.get() + 1);
        self.inner.resolve_region_for_mutation(pos)
    }

    fn read_voxel(&self, region: Self::Region, pos: WorldPos) -> BlockId {
        self.inner.read_voxel(region, pos)
    }

    fn write_voxel(&mut self, region: Self::Region, pos: WorldPos, block: BlockId, metadata: u16) {
        self.calls.push(WorldCall::Write(region, pos, block));
        self.inner.write_voxel(region, pos, block, metadata);
    }

    fn begin_mutation(&mut self, region: Self::Region) {
        self.calls.push(WorldCall::Begin(region));
        self.inner.begin_mutation(region);
    }

    fn end_mutation(&mut self, region: Self::Region) {
        self.calls.push(WorldCall::End(region));
        self.inner.end_mutation(region);
    }
}
