//! Rig orchestration: profile in, armature out.

use log::info;

use flexrig_profile::{MemberKind, Profile};

use crate::armature::Armature;
use crate::controller::attach_controller;
use crate::error::RigResult;
use crate::limbs::{build_arm, build_chest, build_head, build_leg};

/// Builds a complete armature named `armature_name` from a profile.
///
/// Runs chest, heads, arms, and legs in profile order and then the controller
/// pass. The armature is built privately and only returned on success; any
/// failure drops it. Failures inside a member are wrapped in
/// [`RigError::Limb`](crate::RigError::Limb) naming the member.
pub fn build_rig(profile: &Profile, armature_name: &str) -> RigResult<Armature> {
    let mut armature = Armature::new(armature_name);

    build_chest(&mut armature, &profile.chest)?;
    for (index, head) in profile.heads.iter().enumerate() {
        build_head(&mut armature, head)
            .map_err(|e| e.in_member(MemberKind::Heads, index, &head.suffix))?;
    }
    for (index, arm) in profile.arms.iter().enumerate() {
        build_arm(&mut armature, arm)
            .map_err(|e| e.in_member(MemberKind::Arms, index, &arm.suffix))?;
    }
    for (index, leg) in profile.legs.iter().enumerate() {
        build_leg(&mut armature, leg)
            .map_err(|e| e.in_member(MemberKind::Legs, index, &leg.suffix))?;
    }
    attach_controller(&mut armature, profile.control)?;

    info!(
        "built rig '{}' from profile '{}': {} bones, {} ik constraints",
        armature.name(),
        profile.name,
        armature.len(),
        armature.constraints().len()
    );
    Ok(armature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RigError;
    use flexrig_profile::ArmDescriptor;
    use glam::Vec3;

    fn profile() -> Profile {
        Profile::builder("Biped")
            .chest(Vec3::Z, Vec3::new(0.0, 0.0, 1.5), Vec3::new(0.0, 0.0, 2.0))
            .arm(ArmDescriptor::new(
                "L",
                Vec3::new(0.2, 0.0, 1.8),
                Vec3::new(0.6, 0.0, 1.6),
                Vec3::new(1.0, 0.0, 1.6),
            ))
            .build()
    }

    #[test]
    fn test_build_with_control() {
        let armature = build_rig(&profile(), "Rig").unwrap();
        assert_eq!(armature.name(), "Rig");
        assert_eq!(armature.data_name(), "Rig.amt");
        // rib, chest, shoulder, upper, lower, control
        assert_eq!(armature.len(), 6);
        assert!(armature.control().is_some());
    }

    #[test]
    fn test_failure_names_member() {
        let mut profile = profile();
        let mut broken = profile.arms[0].clone();
        broken.suffix = "R".to_string();
        broken.wrist = broken.lower;
        profile.arms.push(broken);

        let err = build_rig(&profile, "Rig").unwrap_err();
        match &err {
            RigError::Limb {
                kind, index, suffix, ..
            } => {
                assert_eq!(*kind, MemberKind::Arms);
                assert_eq!(*index, 1);
                assert_eq!(suffix, "R");
            }
            other => panic!("expected limb error, got {other:?}"),
        }
        assert!(matches!(err.root_cause(), RigError::DegenerateBone { name } if name == "Rig.arm.1.lower_arm.R"));
    }
}
