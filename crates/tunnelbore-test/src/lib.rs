//! Test fixtures for the tunnel bore.
//!
//! Provides a builder for small in-memory worlds and a world wrapper that
//! records every call the bore makes through the world interface.

pub mod recording;
pub mod world;

pub use recording::{RecordingWorld, WorldCall};
pub use world::WorldBuilder;
