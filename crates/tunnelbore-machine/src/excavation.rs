//! Per-activation excavation.
//!
//! One activation walks the cross-section at the current bore distance,
//! clearing every excavatable voxel it can pay for. Missing world data or an
//! empty reservoir end the activation on the spot; a voxel that is not
//! excavatable is simply skipped. Distance only advances when the whole
//! cross-section was walked.

use tracing::{debug, trace_span};
use tunnelbore_core::math::truncate_scaled;
use tunnelbore_core::{BlockId, WorldPos};
use tunnelbore_world::{TouchedRegions, VoxelWorld};

use crate::config::BoreConfig;
use crate::orientation::Frame;
use crate::pattern::{CrossSection, CutOffset};
use crate::power::EnergyReservoir;
use crate::state::BoreProgress;

/// Why an activation stopped early.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbortReason {
    /// A target's region is unloaded, ungenerated or destroyed.
    RegionUnavailable,
    /// The reservoir could not pay for the next voxel.
    InsufficientEnergy,
}

/// How an activation ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExcavationOutcome {
    /// Every cell was visited and the distance advanced.
    Completed,
    /// The activation stopped before the last cell.
    Aborted(AbortReason),
}

impl ExcavationOutcome {
    /// Whether the full cross-section was walked.
    #[inline]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Summary of one activation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExcavationReport {
    /// How the activation ended.
    pub outcome: ExcavationOutcome,
    /// Voxels turned into air.
    pub cleared: usize,
    /// Energy deducted from the reservoir.
    pub energy_spent: f32,
    /// Distinct regions opened for mutation.
    pub regions_touched: usize,
}

/// Clears cross-sections through a [`VoxelWorld`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExcavationEngine {
    cost_per_voxel: f32,
}

impl ExcavationEngine {
    /// Create an engine charging `cost_per_voxel` per cleared voxel.
    pub const fn new(cost_per_voxel: f32) -> Self {
        Self { cost_per_voxel }
    }

    /// Create an engine from machine configuration.
    pub const fn from_config(config: &BoreConfig) -> Self {
        Self::new(config.cost_per_voxel)
    }

    /// Energy charged per cleared voxel.
    #[inline]
    pub const fn cost_per_voxel(&self) -> f32 {
        self.cost_per_voxel
    }

    /// World coordinate of one cross-section cell.
    ///
    /// Each frame product is truncated toward zero before the sum. `None`
    /// when the cell lies past the edge of the coordinate range.
    pub fn target(
        origin: WorldPos,
        frame: &Frame,
        distance: i32,
        offset: CutOffset,
    ) -> Option<WorldPos> {
        origin
            .checked_add(truncate_scaled(frame.forward, distance))?
            .checked_add(truncate_scaled(frame.up, offset.layer))?
            .checked_add(truncate_scaled(frame.right, offset.right))
    }

    /// Every target of one activation, in enumeration order.
    pub fn targets(
        origin: WorldPos,
        frame: Frame,
        distance: i32,
        pattern: CrossSection,
    ) -> impl Iterator<Item = Option<WorldPos>> {
        pattern
            .offsets()
            .map(move |offset| Self::target(origin, &frame, distance, offset))
    }

    /// Run one activation.
    ///
    /// Regions opened along the way are released before returning, whether
    /// the pass completed or aborted.
    pub fn excavate<W: VoxelWorld + ?Sized>(
        &self,
        world: &mut W,
        origin: WorldPos,
        frame: &Frame,
        progress: &mut BoreProgress,
        reservoir: &mut EnergyReservoir,
        pattern: CrossSection,
    ) -> ExcavationReport {
        let distance = progress.distance();
        let _span = trace_span!("bore.excavate", distance, ?pattern).entered();
        let energy_before = reservoir.current();

        let (outcome, cleared, regions_touched) = TouchedRegions::scope(world, |regions| {
            let mut cleared = 0;
            let outcome = self.clear_cross_section(
                regions,
                Self::targets(origin, *frame, distance, pattern),
                reservoir,
                &mut cleared,
            );
            (outcome, cleared, regions.touched().len())
        });

        match outcome {
            ExcavationOutcome::Completed => progress.advance(),
            ExcavationOutcome::Aborted(reason) => {
                debug!(?reason, distance, cleared, "excavation aborted");
            }
        }

        ExcavationReport {
            outcome,
            cleared,
            energy_spent: energy_before - reservoir.current(),
            regions_touched,
        }
    }

    fn clear_cross_section<W: VoxelWorld + ?Sized>(
        &self,
        regions: &mut TouchedRegions<'_, W>,
        targets: impl Iterator<Item = Option<WorldPos>>,
        reservoir: &mut EnergyReservoir,
        cleared: &mut usize,
    ) -> ExcavationOutcome {
        for target in targets {
            let Some((target, region)) = target.and_then(|target| {
                regions
                    .world()
                    .resolve_region_for_mutation(target)
                    .map(|region| (target, region))
            }) else {
                return ExcavationOutcome::Aborted(AbortReason::RegionUnavailable);
            };

            if !regions.world().read_voxel(region, target).is_excavatable() {
                continue;
            }

            if !reservoir.consume(self.cost_per_voxel) {
                return ExcavationOutcome::Aborted(AbortReason::InsufficientEnergy);
            }

            regions.write_voxel(region, target, BlockId::AIR, 0);
            *cleared += 1;
        }

        ExcavationOutcome::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::{face, OrientationFlags};
    use tunnelbore_core::RegionPos;
    use tunnelbore_world::{Region, RegionManager};

    const COST: f32 = 10.0;

    fn stone_world(min: RegionPos, max: RegionPos) -> RegionManager {
        let manager = RegionManager::default();
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    manager.insert(Region::filled(RegionPos::new(x, y, z), BlockId::STONE));
                }
            }
        }
        manager
    }

    fn charged(energy: f32) -> EnergyReservoir {
        let mut reservoir = EnergyReservoir::new(5000.0, 0.99);
        assert!(reservoir.deliver(energy));
        reservoir
    }

    #[test]
    fn square_targets_with_identity_frame() {
        let origin = WorldPos::new(4, 4, 4);
        let targets: Vec<_> =
            ExcavationEngine::targets(origin, Frame::IDENTITY, 3, CrossSection::Square)
                .flatten()
                .collect();

        assert_eq!(targets.len(), 9);
        assert_eq!(targets[0], WorldPos::new(3, 4, 7));
        assert_eq!(targets[4], WorldPos::new(4, 5, 7));
        assert_eq!(targets[8], WorldPos::new(5, 6, 7));
    }

    #[test]
    fn targets_follow_rotated_frame() {
        let frame = Frame::resolve(OrientationFlags::new(face::TOP, 1)).unwrap();
        let target = ExcavationEngine::target(
            WorldPos::new(0, 0, 0),
            &frame,
            5,
            CutOffset { layer: 2, right: 1 },
        );
        // forward +X, up +Y, right -Z
        assert_eq!(target, Some(WorldPos::new(5, 2, -1)));
    }

    #[test]
    fn full_pass_charges_every_voxel_and_advances() {
        let mut world = stone_world(RegionPos::new(-1, 0, 0), RegionPos::new(0, 0, 0));
        let mut progress = BoreProgress::new(64);
        let mut reservoir = charged(1000.0);

        let report = ExcavationEngine::new(COST).excavate(
            &mut world,
            WorldPos::new(8, 2, 2),
            &Frame::IDENTITY,
            &mut progress,
            &mut reservoir,
            CrossSection::Square,
        );

        assert_eq!(report.outcome, ExcavationOutcome::Completed);
        assert_eq!(report.cleared, 9);
        assert!((report.energy_spent - 9.0 * COST).abs() < 1e-3);
        assert!((reservoir.current() - (1000.0 - 9.0 * COST)).abs() < 1e-3);
        assert_eq!(progress.distance(), 2);
        assert!(world.locked_regions().is_empty());
        assert_eq!(
            world.voxel_at(WorldPos::new(7, 2, 3)).map(|v| v.block_id),
            Some(BlockId::AIR)
        );
    }

    #[test]
    fn skips_non_excavatable_voxels_for_free() {
        let mut world = stone_world(RegionPos::new(0, 0, 0), RegionPos::new(0, 0, 0));
        let ore = WorldPos::new(8, 2, 3);
        world.write_voxel(ore.region_pos(), ore, BlockId::ORE, 0);
        let mut progress = BoreProgress::new(64);
        let mut reservoir = charged(1000.0);

        let report = ExcavationEngine::new(COST).excavate(
            &mut world,
            WorldPos::new(8, 2, 2),
            &Frame::IDENTITY,
            &mut progress,
            &mut reservoir,
            CrossSection::Square,
        );

        assert!(report.outcome.is_completed());
        assert_eq!(report.cleared, 8);
        assert_eq!(world.voxel_at(ore).map(|v| v.block_id), Some(BlockId::ORE));
        assert_eq!(progress.distance(), 2);
    }

    #[test]
    fn insufficient_energy_clears_nothing() {
        let mut world = stone_world(RegionPos::new(0, 0, 0), RegionPos::new(0, 0, 0));
        let mut progress = BoreProgress::new(64);
        let mut reservoir = charged(COST - 1.0);

        let report = ExcavationEngine::new(COST).excavate(
            &mut world,
            WorldPos::new(8, 2, 2),
            &Frame::IDENTITY,
            &mut progress,
            &mut reservoir,
            CrossSection::Square,
        );

        assert_eq!(
            report.outcome,
            ExcavationOutcome::Aborted(AbortReason::InsufficientEnergy)
        );
        assert_eq!(report.cleared, 0);
        assert_eq!(report.regions_touched, 0);
        assert_eq!(progress.distance(), 1);
        assert!((reservoir.current() - (COST - 1.0)).abs() < f32::EPSILON);
    }

    #[test]
    fn energy_running_out_midway_keeps_what_was_cleared() {
        let mut world = stone_world(RegionPos::new(0, 0, 0), RegionPos::new(0, 0, 0));
        let mut progress = BoreProgress::new(64);
        let mut reservoir = charged(4.0 * COST);

        let report = ExcavationEngine::new(COST).excavate(
            &mut world,
            WorldPos::new(8, 2, 2),
            &Frame::IDENTITY,
            &mut progress,
            &mut reservoir,
            CrossSection::Square,
        );

        assert_eq!(
            report.outcome,
            ExcavationOutcome::Aborted(AbortReason::InsufficientEnergy)
        );
        assert_eq!(report.cleared, 4);
        assert_eq!(progress.distance(), 1);
        assert!(world.locked_regions().is_empty());
    }

    #[test]
    fn unloaded_region_aborts_before_anything_changes() {
        let mut world = RegionManager::default();
        let mut progress = BoreProgress::new(64);
        let mut reservoir = charged(1000.0);

        let report = ExcavationEngine::new(COST).excavate(
            &mut world,
            WorldPos::new(8, 2, 2),
            &Frame::IDENTITY,
            &mut progress,
            &mut reservoir,
            CrossSection::Staircase,
        );

        assert_eq!(
            report.outcome,
            ExcavationOutcome::Aborted(AbortReason::RegionUnavailable)
        );
        assert_eq!(report.cleared, 0);
        assert_eq!(progress.distance(), 1);
        assert!((reservoir.current() - 1000.0).abs() < f32::EPSILON);
    }

    #[test]
    fn far_unloaded_coordinate_is_not_aliased_onto_a_loaded_region() {
        let mut world = stone_world(RegionPos::new(0, 0, 0), RegionPos::new(0, 0, 0));
        let far = WorldPos::new(1 << 40, 2, 2);
        assert_eq!(world.resolve_region_for_mutation(far), None);

        let mut progress = BoreProgress::new(64);
        let mut reservoir = charged(1000.0);
        let report = ExcavationEngine::new(COST).excavate(
            &mut world,
            far,
            &Frame::IDENTITY,
            &mut progress,
            &mut reservoir,
            CrossSection::Square,
        );

        assert_eq!(
            report.outcome,
            ExcavationOutcome::Aborted(AbortReason::RegionUnavailable)
        );
        assert_eq!(report.cleared, 0);
        assert!(world.dirty_regions().is_empty());
    }

    #[test]
    fn target_past_coordinate_range_is_unavailable() {
        let edge = WorldPos::new(0, 0, i64::MAX);
        assert_eq!(
            ExcavationEngine::target(edge, &Frame::IDENTITY, 1, CutOffset { layer: 0, right: 0 }),
            None
        );

        let mut world = RegionManager::default();
        world.insert(Region::filled(edge.region_pos(), BlockId::STONE));
        let mut progress = BoreProgress::new(64);
        let mut reservoir = charged(1000.0);
        let report = ExcavationEngine::new(COST).excavate(
            &mut world,
            edge,
            &Frame::IDENTITY,
            &mut progress,
            &mut reservoir,
            CrossSection::Square,
        );

        assert_eq!(
            report.outcome,
            ExcavationOutcome::Aborted(AbortReason::RegionUnavailable)
        );
        assert_eq!(progress.distance(), 1);
        assert!((reservoir.current() - 1000.0).abs() < f32::EPSILON);
    }
}
