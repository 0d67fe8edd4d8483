//! Cross-section patterns.

use tunnelbore_core::{Error, Result};

/// One cell of a cross-section, in frame-local units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CutOffset {
    /// Steps along the frame's up vector.
    pub layer: i32,
    /// Steps along the frame's right vector.
    pub right: i32,
}

/// Shape cleared on each activation.
///
/// Chosen once from the placed block's value and never changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CrossSection {
    /// Ten layers, each one cell wider on both sides than the one below.
    Staircase,
    /// Fixed 3x3 square.
    Square,
}

impl CrossSection {
    /// Map a placed block value to a pattern.
    pub fn from_selector(value: u16) -> Result<Self> {
        match value {
            0 => Ok(Self::Staircase),
            1 => Ok(Self::Square),
            other => Err(Error::InvalidPattern(other)),
        }
    }

    /// The block value that selects this pattern.
    pub const fn selector(self) -> u16 {
        match self {
            Self::Staircase => 0,
            Self::Square => 1,
        }
    }

    /// Display name of the machine that cuts this pattern.
    pub const fn machine_name(self) -> &'static str {
        match self {
            Self::Staircase => "Tunnel Bore (Stair Case)",
            Self::Square => "Tunnel Bore (3x3 Square)",
        }
    }

    /// Number of layers stacked along up.
    pub const fn layers(self) -> i32 {
        match self {
            Self::Staircase => 10,
            Self::Square => 3,
        }
    }

    /// Largest `|right|` cut on `layer`.
    pub const fn half_width(self, layer: i32) -> i32 {
        match self {
            Self::Staircase => 2 + layer,
            Self::Square => 1,
        }
    }

    /// Every cell of the cross-section, layer by layer, left to right.
    pub fn offsets(self) -> impl Iterator<Item = CutOffset> {
        (0..self.layers()).flat_map(move |layer| {
            let half = self.half_width(layer);
            (-half..=half).map(move |right| CutOffset { layer, right })
        })
    }

    /// Number of cells per activation.
    pub fn offset_count(self) -> usize {
        self.offsets().count()
    }
}
