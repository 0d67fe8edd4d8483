//! Orientation flags and the local excavation frame.
//!
//! A placed block carries one byte of orientation. The low six bits name the
//! face the block's top points through, exactly one bit set. Bits 6-7 count
//! quarter turns around that axis. That gives 24 legal rotations; every
//! other byte is rejected.

use glam::Vec3;
use tunnelbore_core::{Error, Result};

/// Face bits for the block's up direction.
pub mod face {
    /// Up is +Y
    pub const TOP: u8 = 1;
    /// Up is -Y
    pub const BOTTOM: u8 = 2;
    /// Up is -X
    pub const LEFT: u8 = 4;
    /// Up is +X
    pub const RIGHT: u8 = 8;
    /// Up is +Z
    pub const FRONT: u8 = 16;
    /// Up is -Z
    pub const BACK: u8 = 32;
    /// All face bits
    pub const MASK: u8 = 0x3F;
}

const TURN_SHIFT: u8 = 6;

/// Raw orientation byte as stored on a placed block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OrientationFlags(pub u8);

impl OrientationFlags {
    /// Default placement: up is +Y, forward is +Z.
    pub const DEFAULT: Self = Self(face::TOP);

    /// Build flags from a face bit and a quarter-turn count (taken mod 4).
    #[inline]
    pub const fn new(face_bits: u8, quarter_turns: u8) -> Self {
        Self((face_bits & face::MASK) | ((quarter_turns & 3) << TURN_SHIFT))
    }

    /// The face bits.
    #[inline]
    pub const fn face_bits(self) -> u8 {
        self.0 & face::MASK
    }

    /// Quarter turns around the up axis (0-3).
    #[inline]
    pub const fn quarter_turns(self) -> u8 {
        self.0 >> TURN_SHIFT
    }

    /// Whether these flags name one of the 24 legal rotations.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.face_bits().count_ones() == 1
    }

    /// Every legal orientation.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..6u8).flat_map(|bit| (0..4u8).map(move |turns| Self::new(1 << bit, turns)))
    }
}

/// Local excavation frame: three orthonormal unit vectors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Direction the tunnel advances.
    pub forward: Vec3,
    /// Direction layers stack.
    pub up: Vec3,
    /// Direction the cut widens.
    pub right: Vec3,
}

impl Frame {
    /// Frame for [`OrientationFlags::DEFAULT`].
    pub const IDENTITY: Self = Self {
        forward: Vec3::Z,
        up: Vec3::Y,
        right: Vec3::X,
    };

    /// Resolve orientation flags to a frame.
    ///
    /// Components are exact axis values, so truncating them onto the voxel
    /// grid never loses a cell.
    pub fn resolve(flags: OrientationFlags) -> Result<Self> {
        if !flags.is_valid() {
            return Err(Error::InvalidOrientation(flags.0));
        }

        let (up, mut forward) = match flags.face_bits() {
            face::TOP => (Vec3::Y, Vec3::Z),
            face::BOTTOM => (Vec3::NEG_Y, Vec3::NEG_Z),
            face::LEFT => (Vec3::NEG_X, Vec3::Z),
            face::RIGHT => (Vec3::X, Vec3::Z),
            face::FRONT => (Vec3::Z, Vec3::Y),
            face::BACK => (Vec3::NEG_Z, Vec3::Y),
            _ => return Err(Error::InvalidOrientation(flags.0)),
        };

        // A quarter turn about a unit axis maps a perpendicular v to axis x v.
        for _ in 0..flags.quarter_turns() {
            forward = up.cross(forward);
        }
        let right = up.cross(forward);

        Ok(Self {
            forward: forward.normalize(),
            up: up.normalize(),
            right: right.normalize(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::collections::HashSet;

    #[test]
    fn twenty_four_legal_orientations() {
        let all: Vec<_> = OrientationFlags::all().collect();
        assert_eq!(all.len(), 24);
        assert!(all.iter().all(|f| f.is_valid()));

        let legal = (0..=u8::MAX)
            .map(OrientationFlags)
            .filter(|f| f.is_valid())
            .count();
        assert_eq!(legal, 24);
    }

    #[test]
    fn every_frame_is_orthonormal() {
        for flags in OrientationFlags::all() {
            let frame = Frame::resolve(flags).unwrap();
            for v in [frame.forward, frame.up, frame.right] {
                assert_abs_diff_eq!(v.length(), 1.0, epsilon = 1e-5);
            }
            assert_abs_diff_eq!(frame.forward.dot(frame.up), 0.0, epsilon = 1e-5);
            assert_abs_diff_eq!(frame.forward.dot(frame.right), 0.0, epsilon = 1e-5);
            assert_abs_diff_eq!(frame.up.dot(frame.right), 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn every_frame_is_right_handed() {
        for flags in OrientationFlags::all() {
            let frame = Frame::resolve(flags).unwrap();
            assert_eq!(frame.right.cross(frame.up), frame.forward, "{flags:?}");
        }
    }

    #[test]
    fn frames_are_distinct() {
        let frames: HashSet<_> = OrientationFlags::all()
            .map(|flags| {
                let frame = Frame::resolve(flags).unwrap();
                (
                    frame.forward.to_array().map(|c| c as i32),
                    frame.up.to_array().map(|c| c as i32),
                )
            })
            .collect();
        assert_eq!(frames.len(), 24);
    }

    #[test]
    fn default_is_identity() {
        assert_eq!(Frame::resolve(OrientationFlags::DEFAULT).unwrap(), Frame::IDENTITY);
    }

    #[test]
    fn quarter_turn_about_top() {
        let frame = Frame::resolve(OrientationFlags::new(face::TOP, 1)).unwrap();
        assert_eq!(frame.up, Vec3::Y);
        assert_eq!(frame.forward, Vec3::X);
        assert_eq!(frame.right, Vec3::NEG_Z);
    }

    #[test]
    fn rejects_zero_and_multiple_faces() {
        assert_eq!(
            Frame::resolve(OrientationFlags(0)),
            Err(Error::InvalidOrientation(0))
        );
        assert_eq!(
            Frame::resolve(OrientationFlags(face::TOP | face::LEFT)),
            Err(Error::InvalidOrientation(5))
        );
        assert!(Frame::resolve(OrientationFlags(0xC0)).is_err());
    }
}
