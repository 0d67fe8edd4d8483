//! World access for the tunnel bore.
//!
//! The bore never owns voxel storage. It reaches the world only through the
//! [`VoxelWorld`] trait, and every region it opens for mutation during one
//! activation is tracked by a [`TouchedRegions`] guard that releases them on
//! drop. [`RegionManager`] is an in-memory implementation used by the
//! simulator and the tests.

pub mod access;
pub mod region;
pub mod region_manager;

pub use access::{TouchedRegions, VoxelWorld};
pub use region::{Region, RegionState};
pub use region_manager::RegionManager;
