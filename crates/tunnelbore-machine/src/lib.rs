//! Tick-driven tunnel boring machine.
//!
//! A bore sits at a fixed world position and, once powered, carves a tunnel
//! of fixed cross-section along the forward axis of its orientation. Each
//! low-frequency tick the lifecycle state is re-evaluated; while boring, one
//! excavation pass runs every few ticks, charging energy per voxel cleared
//! and advancing one cell when the whole cross-section was walked.
//!
//! # Example
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use tunnelbore_core::{BlockId, RegionPos, WorldPos};
//! use tunnelbore_machine::{
//!     Authority, BoreConfig, BoreSpawn, CrossSection, MachineEntity, OrientationFlags,
//!     PowerConsumer, TunnelBore,
//! };
//! use tunnelbore_world::{Region, RegionManager};
//!
//! let mut world = RegionManager::default();
//! world.insert(Region::filled(RegionPos::new(0, 0, 0), BlockId::STONE));
//!
//! let spawn = BoreSpawn::at(
//!     WorldPos::new(8, 2, 2),
//!     OrientationFlags::DEFAULT,
//!     CrossSection::Square,
//! );
//! let config = BoreConfig::default().with_sleep_ticks(1);
//! let mut bore = TunnelBore::new(&spawn, config, &mut StdRng::seed_from_u64(0))?;
//! assert!(bore.deliver_power(500.0));
//!
//! bore.low_frequency_update(&mut world, Authority::Server);
//! let report = bore.low_frequency_update(&mut world, Authority::Server);
//! assert_eq!(report.map(|r| r.cleared), Some(9));
//! # Ok::<(), tunnelbore_core::Error>(())
//! ```

pub mod config;
pub mod excavation;
pub mod factory;
pub mod machine;
pub mod orientation;
pub mod pattern;
pub mod power;
pub mod snapshot;
pub mod state;
pub mod status;

pub use config::BoreConfig;
pub use excavation::{AbortReason, ExcavationEngine, ExcavationOutcome, ExcavationReport};
pub use factory::{BoreFactory, ENTITY_KEY};
pub use machine::{Authority, BoreSpawn, MachineEntity, TunnelBore};
pub use orientation::{face, Frame, OrientationFlags};
pub use pattern::{CrossSection, CutOffset};
pub use power::{EnergyReservoir, PowerConsumer};
pub use snapshot::{BoreSnapshot, SNAPSHOT_LEN};
pub use state::{BoreProgress, BoreState, SleepCounter};
pub use status::{BoreStatus, FLAVOR_TEXTS};
