//! Error types for the tunnel bore.

use thiserror::Error;

/// Bore-wide error type.
///
/// Only construction, reorientation and snapshot decoding can fail. Missing
/// world data and exhausted energy are ordinary outcomes of an activation and
/// never surface here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Orientation flags outside the 24 legal rotations
    #[error("Invalid orientation flags: {0:#04x}")]
    InvalidOrientation(u8),

    /// Cross-section selector with no known pattern
    #[error("Invalid cross-section pattern selector: {0}")]
    InvalidPattern(u16),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Snapshot bytes decoded to an impossible state
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
