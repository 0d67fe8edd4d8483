//! Host registration glue.

use rand::Rng;
use tracing::{debug, warn};
use tunnelbore_core::{BlockId, Result};

use crate::config::BoreConfig;
use crate::machine::{BoreSpawn, TunnelBore};

/// Key the bore block is registered under in the host's terrain data.
pub const ENTITY_KEY: &str = "Innominate.BoringCompany";

/// Creates tunnel bores for placed blocks of the registered type.
#[derive(Debug, Clone)]
pub struct BoreFactory {
    bore_block: Option<BlockId>,
    config: BoreConfig,
}

impl BoreFactory {
    /// Register with the host, resolving the bore block by [`ENTITY_KEY`].
    ///
    /// A host that does not know the key yields a factory that never spawns.
    pub fn register(
        config: BoreConfig,
        lookup: impl FnOnce(&str) -> Option<BlockId>,
    ) -> Result<Self> {
        config.validate()?;
        let bore_block = lookup(ENTITY_KEY);
        match bore_block {
            Some(block) => debug!(?block, key = ENTITY_KEY, "registered tunnel bore"),
            None => warn!(key = ENTITY_KEY, "tunnel bore block not found in terrain data"),
        }
        Ok(Self { bore_block, config })
    }

    /// Block id bores are spawned for, if registration found one.
    pub const fn bore_block(&self) -> Option<BlockId> {
        self.bore_block
    }

    /// Configuration handed to every spawned machine.
    pub const fn config(&self) -> &BoreConfig {
        &self.config
    }

    /// Spawn a machine if `spawn` is a bore block; `Ok(None)` otherwise.
    pub fn create<R: Rng + ?Sized>(
        &self,
        spawn: &BoreSpawn,
        rng: &mut R,
    ) -> Result<Option<TunnelBore>> {
        if self.bore_block != Some(spawn.cube) {
            return Ok(None);
        }
        TunnelBore::new(spawn, self.config.clone(), rng).map(Some)
    }
}
