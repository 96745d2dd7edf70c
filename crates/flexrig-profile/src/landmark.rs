//! Landmark helpers.
//!
//! Optional landmarks (hand, thumb) use the exact zero vector as the "absent"
//! marker. A point that is merely close to the origin is present.

use glam::Vec3;

/// Returns true if the landmark is the exact zero vector.
pub fn is_absent(point: Vec3) -> bool {
    point == Vec3::ZERO
}

/// Returns the landmark unless it is the zero sentinel.
pub fn present(point: Vec3) -> Option<Vec3> {
    if is_absent(point) {
        None
    } else {
        Some(point)
    }
}
