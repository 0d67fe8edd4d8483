//! Core types and errors for the tunnel bore.
//!
//! This crate provides the foundational types shared by the world interface
//! and the machine:
//! - Block ids and voxels
//! - Coordinate systems (world, region, local)
//! - Truncating vector-to-grid math
//! - The crate-wide error type

pub mod coords;
pub mod error;
pub mod math;
pub mod types;

pub use coords::{LocalPos, RegionPos, WorldPos};
pub use error::{Error, Result};
pub use types::{BlockId, Voxel};

/// Engine-wide constants
pub mod constants {
    /// Size of a region in voxels per axis
    pub const REGION_SIZE: usize = 16;
    /// Total voxels in a region (16^3)
    pub const REGION_SIZE_CUBED: usize = REGION_SIZE * REGION_SIZE * REGION_SIZE;
    /// Bits needed to represent position within a region (4 bits for 0-15)
    pub const REGION_BITS: u32 = 4;
}
