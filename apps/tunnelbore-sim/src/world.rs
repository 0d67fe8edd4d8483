//! Stone world laid along a bore's path.

use tracing::debug;
use tunnelbore_core::{BlockId, WorldPos};
use tunnelbore_machine::{CrossSection, ExcavationEngine, Frame};
use tunnelbore_world::{Region, RegionManager};

/// Load solid stone regions covering every cell the bore can reach.
///
/// Only regions on the path are created, so long tunnels stay cheap.
pub fn stone_along_path(
    origin: WorldPos,
    frame: Frame,
    pattern: CrossSection,
    max_distance: i32,
) -> RegionManager {
    let world = RegionManager::default();
    for distance in 1..=max_distance {
        for target in ExcavationEngine::targets(origin, frame, distance, pattern).flatten() {
            let pos = target.region_pos();
            if !world.contains(pos) {
                world.insert(Region::filled(pos, BlockId::STONE));
            }
        }
    }
    debug!(regions = world.len(), max_distance, "stone world ready");
    world
}
