//! Vector-to-grid helpers.

use glam::Vec3;

use crate::coords::WorldPos;

/// Scale `v` by `n` and truncate each component toward zero.
///
/// This is a cast, not a rounding: `0.9 * 1` lands on `0` and `-1.5 * 1` on
/// `-1`. For axis-aligned unit vectors the result is exact.
#[inline]
pub fn truncate_scaled(v: Vec3, n: i32) -> WorldPos {
    let n = f64::from(n);
    WorldPos::new(
        (f64::from(v.x) * n) as i64,
        (f64::from(v.y) * n) as i64,
        (f64::from(v.z) * n) as i64,
    )
}
