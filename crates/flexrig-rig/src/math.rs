//! Vector helpers on top of `glam`.

use glam::Vec3;

/// Below this, `1 + y` is too small to divide by safely.
const SAFE_THRESHOLD: f32 = 6.1e-3;

/// Below this, the direction is treated as exactly -Y.
const CRITICAL_THRESHOLD: f32 = 2.5e-4;

/// Local X axis of a bone from `head` to `tail` at zero roll.
///
/// The bone's local Y axis is its normalized direction. Its rest frame is the
/// shortest-arc rotation taking world +Y onto that direction, so the X axis
/// is the image of world +X under that rotation. A bone pointing straight
/// down -Y has no unique shortest arc and uses a half turn about Z.
///
/// Returns `None` when the bone has zero length or non-finite endpoints.
pub fn bone_x_axis(head: Vec3, tail: Vec3) -> Option<Vec3> {
    let nor = (tail - head).try_normalize()?;
    let (x, y, z) = (nor.x, nor.y, nor.z);

    let mut theta = 1.0 + y;
    let theta_alt = x * x + z * z;

    if theta > SAFE_THRESHOLD || theta_alt > CRITICAL_THRESHOLD * CRITICAL_THRESHOLD {
        if theta <= SAFE_THRESHOLD {
            // Series expansion of 1 + y near -Y; avoids cancellation.
            theta = theta_alt * 0.5 + theta_alt * theta_alt * 0.125;
        }
        Some(Vec3::new(1.0 - x * x / theta, -x, -x * z / theta))
    } else {
        Some(Vec3::NEG_X)
    }
}

/// Unsigned angle between two vectors in radians, `None` if either is zero.
pub fn angle(a: Vec3, b: Vec3) -> Option<f32> {
    if a.length_squared() == 0.0 || b.length_squared() == 0.0 {
        return None;
    }
    Some(a.angle_between(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert!(a.abs_diff_eq(b, 1e-5), "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_x_axis_along_y() {
        assert_vec_eq(bone_x_axis(Vec3::ZERO, Vec3::Y).unwrap(), Vec3::X);
    }

    #[test]
    fn test_x_axis_vertical_bones() {
        assert_vec_eq(bone_x_axis(Vec3::ZERO, Vec3::Z).unwrap(), Vec3::X);
        assert_vec_eq(bone_x_axis(Vec3::Z, Vec3::ZERO).unwrap(), Vec3::X);
    }

    #[test]
    fn test_x_axis_pointing_down_y() {
        assert_vec_eq(bone_x_axis(Vec3::ZERO, Vec3::NEG_Y).unwrap(), Vec3::NEG_X);
    }

    #[test]
    fn test_x_axis_is_orthonormal() {
        let head = Vec3::new(0.2, 0.0, 1.8);
        let tail = Vec3::new(0.6, 0.0, 1.6);
        let x_axis = bone_x_axis(head, tail).unwrap();
        let dir = (tail - head).normalize();

        assert_relative_eq!(x_axis.length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(x_axis.dot(dir), 0.0, epsilon = 1e-5);
        assert_vec_eq(x_axis, Vec3::new(0.2, -0.894_427_2, 0.4));
    }

    #[test]
    fn test_x_axis_degenerate() {
        assert_eq!(bone_x_axis(Vec3::ONE, Vec3::ONE), None);
        assert_eq!(bone_x_axis(Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 1.0)), None);
    }

    #[test]
    fn test_angle() {
        assert_relative_eq!(angle(Vec3::X, Vec3::Y).unwrap(), FRAC_PI_2, epsilon = 1e-6);
        assert_relative_eq!(angle(Vec3::X, Vec3::NEG_X).unwrap(), PI, epsilon = 1e-3);
        assert_eq!(angle(Vec3::ZERO, Vec3::Y), None);
    }
}
