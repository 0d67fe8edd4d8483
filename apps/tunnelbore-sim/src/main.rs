//! Tunnel bore simulator
//!
//! Places one bore in a stone world, offers it power every tick and logs
//! each excavation pass until the bore finishes or the tick budget runs out.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p tunnelbore-sim -- [OPTIONS]
//!
//! # Square tunnel heading +X, 20 cells deep
//! cargo run -p tunnelbore-sim -- --pattern square --flags 0x41 --max-distance 20
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

mod config;
mod world;

use std::fmt::Write as _;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use tunnelbore_core::{BlockId, WorldPos};
use tunnelbore_machine::{
    Authority, BoreConfig, BoreFactory, BoreSpawn, BoreState, MachineEntity, PowerConsumer,
};

use crate::config::{print_help, SimConfig};

const BORE_ORIGIN: WorldPos = WorldPos::new(0, 64, 0);

fn main() -> anyhow::Result<()> {
    let sim = SimConfig::from_env()?;
    if sim.help {
        print_help();
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut bore_config = BoreConfig::default();
    if let Some(max) = sim.max_distance {
        bore_config = bore_config.with_max_bore_distance(max);
    }

    let factory = BoreFactory::register(bore_config, |key| {
        (key == tunnelbore_machine::ENTITY_KEY).then_some(BlockId::TUNNEL_BORE)
    })?;
    let spawn = BoreSpawn::at(BORE_ORIGIN, sim.flags, sim.pattern);
    let mut rng = StdRng::seed_from_u64(sim.seed);
    let Some(mut bore) = factory.create(&spawn, &mut rng)? else {
        anyhow::bail!("bore block is not registered");
    };

    let mut world = world::stone_along_path(
        bore.origin(),
        *bore.frame(),
        bore.pattern(),
        factory.config().max_bore_distance,
    );
    info!(
        name = bore.name(),
        origin = ?bore.origin(),
        forward = ?bore.frame().forward,
        regions = world.len(),
        "bore placed"
    );

    let mut cleared = 0;
    let mut passes = 0;
    for _ in 0..sim.ticks {
        let tick = world.advance_tick();

        if bore.wants_power() {
            let offer = sim
                .power_per_tick
                .min(bore.remaining_power_capacity())
                .min(bore.maximum_delivery_rate());
            if offer > 0.0 && !bore.deliver_power(offer) {
                warn!(tick, offer, "power delivery refused");
            }
        }

        if let Some(report) = bore.low_frequency_update(&mut world, Authority::Server) {
            passes += 1;
            cleared += report.cleared;
            info!(
                tick,
                distance = bore.progress().distance(),
                cleared = report.cleared,
                energy = report.energy_spent,
                regions = report.regions_touched,
                outcome = ?report.outcome,
                "excavation pass"
            );
        }

        if bore.needs_network_update() {
            let bytes = bore.write_network_update()?;
            debug!(tick, snapshot = %hex(&bytes), "network update");
        }

        world.evict_if_needed();

        if bore.state() == BoreState::Finished {
            break;
        }
    }

    info!(
        ticks = world.current_tick(),
        passes,
        cleared,
        dirty_regions = world.dirty_regions().len(),
        state = %bore.state(),
        "simulation done"
    );
    println!("{}", bore.popup_text());
    println!("snapshot: {}", hex(&bore.snapshot().encode()?));

    Ok(())
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::new(), |mut out, byte| {
        let _ = write!(out, "{byte:02x}");
        out
    })
}
