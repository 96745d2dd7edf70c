//! IK constraint generation and pole angle computation.

use log::debug;

use crate::armature::{Armature, Bone, BoneId, IkConstraint};
use crate::error::{RigError, RigResult};
use crate::math::angle;

/// Chain length of limb IK: the lower bone and the upper bone.
pub const LIMB_CHAIN_LENGTH: u8 = 2;

/// Handedness threshold in radians for the pole angle sign.
const HANDEDNESS_THRESHOLD: f32 = 1.0;

/// Suffix of IK constraint names.
pub const CONSTRAINT_SUFFIX: &str = "ik";

/// Pole angle that turns the chain's bend plane toward the pole bone.
///
/// The pole direction is projected onto the plane perpendicular to the root
/// bone with a double cross product and measured against the root's X axis.
/// The sign comes from a coarse handedness test: the angle is positive when
/// `x_axis × projected` points at least one radian away from the root bone.
/// A projection already on the X axis has no handedness and stays positive.
///
/// # Errors
///
/// [`RigError::DegenerateBone`] if the root has no orientation and
/// [`RigError::CollinearPole`] if the pole lies on the chain axis.
pub fn pole_angle(root: &Bone, target: &Bone, pole: &Bone) -> RigResult<f32> {
    let origin = root.head();
    let x_axis = root
        .x_axis()
        .ok_or_else(|| RigError::degenerate_bone(root.name()))?;
    let bend_axis = root.tail() - origin;

    let pole_normal = (target.tail() - origin).cross(pole.head() - origin);
    let projected = pole_normal.cross(bend_axis);

    let unsigned = angle(x_axis, projected).ok_or_else(|| RigError::CollinearPole {
        bone: pole.name().to_string(),
    })?;

    match angle(x_axis.cross(projected), bend_axis) {
        Some(handedness) if handedness < HANDEDNESS_THRESHOLD => Ok(-unsigned),
        _ => Ok(unsigned),
    }
}

/// Attaches an IK constraint to `base`, solving `chain_length` bones up to
/// and including `root`.
///
/// The constraint is named `<base>.ik` and stored in the armature.
pub fn attach_ik(
    armature: &mut Armature,
    base: BoneId,
    root: BoneId,
    target: BoneId,
    pole: BoneId,
    chain_length: u8,
) -> RigResult<IkConstraint> {
    let base_bone = armature.bone(base)?;
    let angle = pole_angle(armature.bone(root)?, armature.bone(target)?, armature.bone(pole)?)?;

    let constraint = IkConstraint {
        name: format!("{}.{}", base_bone.name(), CONSTRAINT_SUFFIX),
        bone: base,
        target,
        pole,
        chain_length,
        pole_angle: angle,
    };
    debug!(
        "ik '{}' -> target '{}', pole '{}', chain {}, pole angle {:.4}",
        constraint.name,
        armature[target].name(),
        armature[pole].name(),
        chain_length,
        angle
    );

    armature.push_constraint(constraint.clone());
    Ok(constraint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec3;
    use std::f32::consts::FRAC_PI_2;

    /// Armature with a two bone chain going straight down from the origin.
    fn chain(pole_head: Vec3) -> (Armature, BoneId, BoneId, BoneId, BoneId) {
        let mut armature = Armature::new("Chain");
        let upper = armature
            .create_bone("upper", Vec3::ZERO, Vec3::NEG_Z, None)
            .unwrap();
        let lower = armature
            .create_bone("lower", Vec3::NEG_Z, Vec3::new(0.0, 0.0, -2.0), Some(upper))
            .unwrap();
        let target = armature
            .create_bone("target", Vec3::new(0.0, 0.0, -2.0), Vec3::new(0.0, 0.0, -2.5), None)
            .unwrap();
        let pole = armature
            .create_bone("pole", pole_head, pole_head + Vec3::new(0.0, 0.0, 0.4), None)
            .unwrap();
        (armature, upper, lower, target, pole)
    }

    #[test]
    fn test_pole_angle_sign_follows_pole_side() {
        let (armature, upper, _, target, pole) = chain(Vec3::new(0.0, 1.0, -1.0));
        let front = pole_angle(&armature[upper], &armature[target], &armature[pole]).unwrap();
        assert_relative_eq!(front, FRAC_PI_2, epsilon = 1e-4);

        let (armature, upper, _, target, pole) = chain(Vec3::new(0.0, -1.0, -1.0));
        let back = pole_angle(&armature[upper], &armature[target], &armature[pole]).unwrap();
        assert_relative_eq!(back, -FRAC_PI_2, epsilon = 1e-4);
    }

    #[test]
    fn test_pole_on_chain_axis() {
        let (armature, upper, _, target, pole) = chain(Vec3::new(0.0, 0.0, -1.0));
        let err = pole_angle(&armature[upper], &armature[target], &armature[pole]).unwrap_err();
        assert!(matches!(err, RigError::CollinearPole { ref bone } if bone == "pole"));
    }

    #[test]
    fn test_attach_ik_stores_constraint() {
        let (mut armature, upper, lower, target, pole) = chain(Vec3::new(0.0, -1.0, -1.0));
        let constraint =
            attach_ik(&mut armature, lower, upper, target, pole, LIMB_CHAIN_LENGTH).unwrap();

        assert_eq!(constraint.name, "lower.ik");
        assert_eq!(constraint.chain_length, 2);
        assert_eq!(armature.constraints().len(), 1);
        assert_eq!(armature.constraint_on(lower), Some(&constraint));
        assert_eq!(armature.constraint_on(upper), None);
    }
}
