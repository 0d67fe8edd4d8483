//! The tunnel bore as a host entity.
//!
//! [`TunnelBore`] composes the orientation frame, bore progress, energy
//! reservoir, lifecycle state and excavation engine. It exposes them to the
//! host through the [`MachineEntity`] and [`PowerConsumer`] capabilities.

use rand::Rng;
use tracing::{debug, info, warn};
use tunnelbore_core::{BlockId, Result, WorldPos};
use tunnelbore_world::VoxelWorld;

use crate::config::BoreConfig;
use crate::excavation::{ExcavationEngine, ExcavationReport};
use crate::orientation::{Frame, OrientationFlags};
use crate::pattern::CrossSection;
use crate::power::{EnergyReservoir, PowerConsumer};
use crate::snapshot::BoreSnapshot;
use crate::state::{BoreProgress, BoreState, SleepCounter};
use crate::status::{pick_flavor, BoreStatus};

/// Which side of the network a tick runs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Authority {
    /// Runs the state machine and mutates the world.
    Server,
    /// Mirrors snapshots only.
    Replica,
}

/// Placement parameters handed over by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoreSpawn {
    /// World x of the machine block.
    pub x: i64,
    /// World y of the machine block.
    pub y: i64,
    /// World z of the machine block.
    pub z: i64,
    /// Block id of the placed machine.
    pub cube: BlockId,
    /// Orientation byte.
    pub flags: u8,
    /// Block value, selecting the cross-section.
    pub value: u16,
}

impl BoreSpawn {
    /// Spawn parameters for a bore placed at `origin`.
    pub fn at(origin: WorldPos, flags: OrientationFlags, pattern: CrossSection) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            z: origin.z,
            cube: BlockId::TUNNEL_BORE,
            flags: flags.0,
            value: pattern.selector(),
        }
    }

    /// World coordinate of the machine block.
    pub const fn origin(&self) -> WorldPos {
        WorldPos::new(self.x, self.y, self.z)
    }
}

/// Capabilities the host requires of a placed machine.
pub trait MachineEntity {
    /// The placed block was rotated.
    fn on_update_rotation(&mut self, flags: u8) -> Result<()>;

    /// One low-frequency tick.
    ///
    /// Returns the report of the excavation pass, if one ran.
    fn low_frequency_update<W: VoxelWorld + ?Sized>(
        &mut self,
        world: &mut W,
        authority: Authority,
    ) -> Option<ExcavationReport>;

    /// Text shown when a player looks at the machine.
    fn popup_text(&self) -> String;

    /// Whether replicas are out of date.
    fn needs_network_update(&self) -> bool;

    /// Encode the replicated state and clear the update flag.
    fn write_network_update(&mut self) -> Result<Vec<u8>>;

    /// Mirror replicated state written by the authoritative side.
    fn read_network_update(&mut self, bytes: &[u8]) -> Result<()>;
}

/// A placed tunnel boring machine.
#[derive(Debug, Clone)]
pub struct TunnelBore {
    origin: WorldPos,
    flags: OrientationFlags,
    frame: Frame,
    pattern: CrossSection,
    progress: BoreProgress,
    reservoir: EnergyReservoir,
    state: BoreState,
    sleep: SleepCounter,
    engine: ExcavationEngine,
    config: BoreConfig,
    flavor: &'static str,
    network_dirty: bool,
}

impl TunnelBore {
    /// Create a machine from host placement parameters.
    pub fn new<R: Rng + ?Sized>(spawn: &BoreSpawn, config: BoreConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let flags = OrientationFlags(spawn.flags);
        let frame = Frame::resolve(flags)?;
        let pattern = CrossSection::from_selector(spawn.value)?;

        Ok(Self {
            origin: spawn.origin(),
            flags,
            frame,
            pattern,
            progress: BoreProgress::new(config.max_bore_distance),
            reservoir: EnergyReservoir::new(config.energy_capacity, config.wants_power_ratio),
            state: BoreState::Initializing,
            sleep: SleepCounter::new(config.sleep_ticks),
            engine: ExcavationEngine::from_config(&config),
            config,
            flavor: pick_flavor(rng),
            network_dirty: true,
        })
    }

    /// Re-derive the frame from new flags and restart at distance 1.
    ///
    /// Invalid flags leave the machine untouched.
    pub fn reset_rotation(&mut self, flags: OrientationFlags) -> Result<()> {
        self.frame = Frame::resolve(flags)?;
        self.flags = flags;
        self.progress.reset();
        self.network_dirty = true;
        Ok(())
    }

    /// World coordinate of the machine block.
    pub const fn origin(&self) -> WorldPos {
        self.origin
    }

    /// Current orientation flags.
    pub const fn flags(&self) -> OrientationFlags {
        self.flags
    }

    /// Current excavation frame.
    pub const fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Cross-section cut on each activation.
    pub const fn pattern(&self) -> CrossSection {
        self.pattern
    }

    /// Lifecycle state.
    pub const fn state(&self) -> BoreState {
        self.state
    }

    /// Bore progress.
    pub const fn progress(&self) -> &BoreProgress {
        &self.progress
    }

    /// Energy reservoir.
    pub const fn reservoir(&self) -> &EnergyReservoir {
        &self.reservoir
    }

    /// Ticks counted toward the next excavation pass.
    pub const fn sleep_count(&self) -> u32 {
        self.sleep.count()
    }

    /// Configuration the machine was built with.
    pub const fn config(&self) -> &BoreConfig {
        &self.config
    }

    /// Flavor line chosen at placement.
    pub const fn flavor_text(&self) -> &'static str {
        self.flavor
    }

    /// Display name.
    pub const fn name(&self) -> &'static str {
        self.pattern.machine_name()
    }

    /// Popup contents.
    pub fn status(&self) -> BoreStatus<'static> {
        BoreStatus {
            name: self.name(),
            energy: self.reservoir.current(),
            capacity: self.reservoir.capacity(),
            state: self.state,
            distance: self.progress.distance(),
            flavor: self.flavor,
        }
    }

    /// Replicated state.
    pub const fn snapshot(&self) -> BoreSnapshot {
        BoreSnapshot::new(
            self.state,
            self.progress.distance(),
            self.progress.max_distance(),
        )
    }

    fn transition(&mut self) {
        let next = self.state.next(
            self.progress.distance(),
            self.progress.max_distance(),
            self.reservoir.current(),
            self.engine.cost_per_voxel(),
        );
        if next == self.state {
            return;
        }

        debug!(from = %self.state, to = %next, origin = ?self.origin, "bore state changed");
        if next == BoreState::Finished {
            info!(
                origin = ?self.origin,
                distance = self.progress.distance(),
                "tunnel bore finished"
            );
        }
        self.state = next;
        self.network_dirty = true;
    }
}

impl MachineEntity for TunnelBore {
    fn on_update_rotation(&mut self, flags: u8) -> Result<()> {
        self.reset_rotation(OrientationFlags(flags))
    }

    fn low_frequency_update<W: VoxelWorld + ?Sized>(
        &mut self,
        world: &mut W,
        authority: Authority,
    ) -> Option<ExcavationReport> {
        if authority == Authority::Replica {
            return None;
        }

        self.transition();
        if self.state != BoreState::Boring || !self.sleep.tick() {
            return None;
        }

        let report = self.engine.excavate(
            world,
            self.origin,
            &self.frame,
            &mut self.progress,
            &mut self.reservoir,
            self.pattern,
        );
        if report.outcome.is_completed() {
            self.network_dirty = true;
        }
        Some(report)
    }

    fn popup_text(&self) -> String {
        self.status().to_string()
    }

    fn needs_network_update(&self) -> bool {
        self.network_dirty
    }

    fn write_network_update(&mut self) -> Result<Vec<u8>> {
        let bytes = self.snapshot().encode()?;
        self.network_dirty = false;
        Ok(bytes)
    }

    fn read_network_update(&mut self, bytes: &[u8]) -> Result<()> {
        let snapshot = BoreSnapshot::decode(bytes).inspect_err(|err| {
            warn!(%err, origin = ?self.origin, "rejected bore snapshot");
        })?;
        self.state = snapshot.bore_state()?;
        self.progress
            .mirror(snapshot.bore_distance, snapshot.max_bore_distance);
        Ok(())
    }
}

impl PowerConsumer for TunnelBore {
    fn max_power(&self) -> f32 {
        self.reservoir.capacity()
    }

    fn remaining_power_capacity(&self) -> f32 {
        self.reservoir.remaining_capacity()
    }

    fn maximum_delivery_rate(&self) -> f32 {
        self.config.max_delivery_rate
    }

    fn deliver_power(&mut self, amount: f32) -> bool {
        self.reservoir.deliver(amount)
    }

    fn wants_power(&self) -> bool {
        self.reservoir.wants_more()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::face;
    use glam::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tunnelbore_core::{Error, RegionPos};
    use tunnelbore_world::{Region, RegionManager};

    fn bore(config: BoreConfig) -> TunnelBore {
        let spawn = BoreSpawn::at(
            WorldPos::new(8, 2, 2),
            OrientationFlags::DEFAULT,
            CrossSection::Square,
        );
        TunnelBore::new(&spawn, config, &mut StdRng::seed_from_u64(1)).unwrap()
    }

    fn stone_world() -> RegionManager {
        let manager = RegionManager::default();
        for z in 0..2 {
            manager.insert(Region::filled(RegionPos::new(0, 0, z), BlockId::STONE));
        }
        manager
    }

    #[test]
    fn starts_initializing_then_low_power() {
        let mut bore = bore(BoreConfig::default());
        let mut world = stone_world();
        assert_eq!(bore.state(), BoreState::Initializing);

        assert!(bore.low_frequency_update(&mut world, Authority::Server).is_none());
        assert_eq!(bore.state(), BoreState::LowPower);
    }

    #[test]
    fn boring_excavates_every_fourth_tick() {
        let mut bore = bore(BoreConfig::default());
        let mut world = stone_world();
        assert!(bore.deliver_power(1000.0));

        bore.low_frequency_update(&mut world, Authority::Server);
        let reports: Vec<_> = (0..8)
            .map(|_| bore.low_frequency_update(&mut world, Authority::Server))
            .collect();

        assert_eq!(bore.state(), BoreState::Boring);
        assert_eq!(reports.iter().filter(|r| r.is_some()).count(), 2);
        assert!(reports[3].is_some());
        assert!(reports[7].is_some());
        assert_eq!(bore.progress().distance(), 3);
    }

    #[test]
    fn replica_ticks_do_nothing() {
        let mut bore = bore(BoreConfig::default());
        let mut world = stone_world();
        assert!(bore.deliver_power(1000.0));

        for _ in 0..16 {
            assert!(bore.low_frequency_update(&mut world, Authority::Replica).is_none());
        }
        assert_eq!(bore.state(), BoreState::Initializing);
        assert_eq!(bore.progress().distance(), 1);
        assert!((bore.reservoir().current() - 1000.0).abs() < f32::EPSILON);
    }

    #[test]
    fn rotation_resets_distance() {
        let mut bore = bore(BoreConfig::default().with_sleep_ticks(1));
        let mut world = stone_world();
        assert!(bore.deliver_power(1000.0));
        for _ in 0..4 {
            bore.low_frequency_update(&mut world, Authority::Server);
        }
        assert!(bore.progress().distance() > 1);

        bore.on_update_rotation(OrientationFlags::new(face::TOP, 2).0)
            .unwrap();
        assert_eq!(bore.progress().distance(), 1);
        assert_eq!(bore.frame().forward, Vec3::NEG_Z);
    }

    #[test]
    fn invalid_rotation_keeps_previous_frame() {
        let mut bore = bore(BoreConfig::default());
        assert_eq!(bore.on_update_rotation(0), Err(Error::InvalidOrientation(0)));
        assert_eq!(*bore.frame(), Frame::IDENTITY);
        assert_eq!(bore.flags(), OrientationFlags::DEFAULT);
    }

    #[test]
    fn construction_rejects_bad_inputs() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut spawn = BoreSpawn::at(
            WorldPos::new(0, 0, 0),
            OrientationFlags::DEFAULT,
            CrossSection::Staircase,
        );
        spawn.flags = 0x03;
        assert_eq!(
            TunnelBore::new(&spawn, BoreConfig::default(), &mut rng).unwrap_err(),
            Error::InvalidOrientation(0x03)
        );

        spawn.flags = OrientationFlags::DEFAULT.0;
        spawn.value = 9;
        assert_eq!(
            TunnelBore::new(&spawn, BoreConfig::default(), &mut rng).unwrap_err(),
            Error::InvalidPattern(9)
        );
    }

    #[test]
    fn power_consumer_delegates_to_reservoir() {
        let mut bore = bore(BoreConfig::default());
        assert!((bore.max_power() - 5000.0).abs() < f32::EPSILON);
        assert!((bore.maximum_delivery_rate() - 5000.0).abs() < f32::EPSILON);
        assert!(bore.wants_power());
        assert!(bore.deliver_power(4990.0));
        assert!(!bore.deliver_power(20.0));
        assert!((bore.remaining_power_capacity() - 10.0).abs() < 1e-3);
        assert!(!bore.wants_power());
    }

    #[test]
    fn network_update_flag_clears_on_write() {
        let mut bore = bore(BoreConfig::default());
        assert!(bore.needs_network_update());
        let bytes = bore.write_network_update().unwrap();
        assert_eq!(bytes.len(), crate::snapshot::SNAPSHOT_LEN);
        assert!(!bore.needs_network_update());

        let mut world = stone_world();
        bore.low_frequency_update(&mut world, Authority::Server);
        assert!(bore.needs_network_update());
    }
}
