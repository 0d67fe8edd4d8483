//! Human-readable status shown when a player looks at the machine.

use std::fmt;

use rand::Rng;

use crate::state::BoreState;

/// Lines one of which is attached to each machine at placement.
pub const FLAVOR_TEXTS: [&str; 5] = [
    "It's all just so incredibly boring.",
    "Are you bored yet?",
    "Un-bore-lievable.",
    "These puns are un-bore-able.",
    "If you are bored, put on a cape, then you can be Super Bored!",
];

/// Pick a flavor line uniformly at random.
pub fn pick_flavor<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    FLAVOR_TEXTS[rng.gen_range(0..FLAVOR_TEXTS.len())]
}

/// Popup contents for one machine.
#[derive(Clone, Copy, Debug)]
pub struct BoreStatus<'a> {
    /// Machine name, from the cross-section.
    pub name: &'a str,
    /// Stored energy; shown truncated.
    pub energy: f32,
    /// Reservoir capacity; shown truncated.
    pub capacity: f32,
    /// Lifecycle state.
    pub state: BoreState,
    /// Bore distance, only shown while boring.
    pub distance: i32,
    /// Flavor line picked at placement.
    pub flavor: &'a str,
}

impl fmt::Display for BoreStatus<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "Power: {}/{}", self.energy as i32, self.capacity as i32)?;
        writeln!(f, "State: {}", self.state)?;
        if self.state == BoreState::Boring {
            writeln!(f, "Current Boring Distance: {}", self.distance)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.flavor)
    }
}
