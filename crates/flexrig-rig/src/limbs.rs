//! Limb assembly: turns one profile member into a bone subtree.
//!
//! Each builder appends a record of the bones it created to the armature.
//! The record's position in its list is the member's stable index and is
//! also part of every bone name the builder generates.

use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use flexrig_profile::{ArmDescriptor, ChestDescriptor, HeadDescriptor, LegDescriptor};

use crate::armature::{Armature, BoneId};
use crate::error::{RigError, RigResult};
use crate::ik::{attach_ik, LIMB_CHAIN_LENGTH};
use crate::naming::{body_bone_name, LimbNamer, Region};

/// Distance of a pole bone behind its joint, along -Y.
const POLE_DEPTH: f32 = 1.5;

/// Half the length of a pole bone, along Z.
const POLE_HALF_LENGTH: f32 = 0.2;

/// Length of an IK target bone, along +Y.
const TARGET_LENGTH: f32 = 0.5;

/// Role to bone-name map handed to external consumers.
pub type RoleNames = BTreeMap<&'static str, String>;

fn names_of(armature: &Armature, roles: &[(&'static str, Option<BoneId>)]) -> RoleNames {
    roles
        .iter()
        .filter_map(|(role, id)| {
            id.and_then(|id| armature.get(id))
                .map(|bone| (*role, bone.name().to_string()))
        })
        .collect()
}

/// Bones of the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyBones {
    pub rib: BoneId,
    pub chest: BoneId,
}

impl BodyBones {
    pub fn bone_names(&self, armature: &Armature) -> RoleNames {
        names_of(armature, &[("rib", Some(self.rib)), ("chest", Some(self.chest))])
    }
}

/// Bones of one head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadBones {
    pub suffix: String,
    pub neck: BoneId,
    pub head: BoneId,
}

impl HeadBones {
    pub fn bone_names(&self, armature: &Armature) -> RoleNames {
        names_of(armature, &[("neck", Some(self.neck)), ("head", Some(self.head))])
    }
}

/// Bones of one arm. Optional roles are `None` when not built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmBones {
    pub suffix: String,
    pub shoulder: Option<BoneId>,
    pub upper_arm: BoneId,
    pub lower_arm: BoneId,
    pub hand: Option<BoneId>,
    pub thumb: Option<BoneId>,
    /// IK pole bone.
    pub elbow: Option<BoneId>,
    /// IK target bone.
    pub ik: Option<BoneId>,
}

impl ArmBones {
    fn roles(&self) -> [(&'static str, Option<BoneId>); 7] {
        [
            ("shoulder", self.shoulder),
            ("upper_arm", Some(self.upper_arm)),
            ("lower_arm", Some(self.lower_arm)),
            ("hand", self.hand),
            ("thumb", self.thumb),
            ("elbow", self.elbow),
            ("ik", self.ik),
        ]
    }

    /// Bones of this arm in build order.
    pub fn bones(&self) -> impl Iterator<Item = BoneId> {
        self.roles().into_iter().filter_map(|(_, id)| id)
    }

    pub fn bone_names(&self, armature: &Armature) -> RoleNames {
        names_of(armature, &self.roles())
    }
}

/// Bones of one leg. Optional roles are `None` when not built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegBones {
    pub suffix: String,
    pub hip: Option<BoneId>,
    pub upper_leg: BoneId,
    pub lower_leg: BoneId,
    pub foot: BoneId,
    /// IK pole bone.
    pub knee: Option<BoneId>,
    /// IK target bone.
    pub ik: Option<BoneId>,
}

impl LegBones {
    fn roles(&self) -> [(&'static str, Option<BoneId>); 6] {
        [
            ("hip", self.hip),
            ("upper_leg", Some(self.upper_leg)),
            ("lower_leg", Some(self.lower_leg)),
            ("foot", Some(self.foot)),
            ("knee", self.knee),
            ("ik", self.ik),
        ]
    }

    /// Bones of this leg in build order.
    pub fn bones(&self) -> impl Iterator<Item = BoneId> {
        self.roles().into_iter().filter_map(|(_, id)| id)
    }

    pub fn bone_names(&self, armature: &Armature) -> RoleNames {
        names_of(armature, &self.roles())
    }
}

fn require_body(armature: &Armature) -> RigResult<BodyBones> {
    armature
        .body()
        .copied()
        .ok_or_else(|| RigError::unknown_reference(body_bone_name(armature.name(), "chest")))
}

/// Builds the rib and chest bones.
///
/// The rib adopts the armature's first bone, renamed `<armature>.rib` and
/// moved onto stomach to chest. The chest bone runs chest to top of chest,
/// connected to the rib.
pub fn build_chest(armature: &mut Armature, chest: &ChestDescriptor) -> RigResult<BodyBones> {
    let rib_name = body_bone_name(armature.name(), "rib");
    let chest_name = body_bone_name(armature.name(), "chest");

    let rib = match armature.first_bone() {
        Some(root) => {
            armature.rename(root, rib_name)?;
            armature.set_endpoints(root, chest.rib, chest.chest)?;
            root
        }
        None => armature.create_bone(rib_name, chest.rib, chest.chest, None)?,
    };
    let chest_bone = armature.create_bone(chest_name, chest.chest, chest.tchest, Some(rib))?;

    let body = BodyBones {
        rib,
        chest: chest_bone,
    };
    armature.body = Some(body);
    Ok(body)
}

/// Builds a neck and head on top of the chest. Returns the head's index.
pub fn build_head(armature: &mut Armature, head: &HeadDescriptor) -> RigResult<usize> {
    let body = require_body(armature)?;
    let index = armature.heads.len();
    let namer = LimbNamer::new(armature.name(), Region::Head, index, &head.suffix);

    let chest_tail = armature[body.chest].tail();
    let neck = armature.create_bone(namer.name("neck"), chest_tail, head.neck, Some(body.chest))?;
    let head_bone = armature.create_bone(namer.name("head"), head.neck, head.head, Some(neck))?;

    armature.heads.push(HeadBones {
        suffix: head.suffix.clone(),
        neck,
        head: head_bone,
    });
    Ok(index)
}

/// Creates the non-deforming pole and target bones of a limb.
///
/// The pole sits [`POLE_DEPTH`] behind `joint`; the target starts at `end`.
fn build_ik_handles(
    armature: &mut Armature,
    pole_name: String,
    target_name: String,
    joint: Vec3,
    end: Vec3,
) -> RigResult<(BoneId, BoneId)> {
    let pole_center = joint - Vec3::Y * POLE_DEPTH;
    let pole = armature.create_bone(
        pole_name,
        pole_center - Vec3::Z * POLE_HALF_LENGTH,
        pole_center + Vec3::Z * POLE_HALF_LENGTH,
        None,
    )?;
    armature.set_deform(pole, false)?;

    let target = armature.create_bone(target_name, end, end + Vec3::Y * TARGET_LENGTH, None)?;
    armature.set_deform(target, false)?;

    Ok((pole, target))
}

/// Builds an arm. Returns the arm's index.
///
/// Without a shoulder the upper arm is left unparented for the controller
/// pass. Hand and thumb are built only when their landmarks are present. With
/// IK, hand and thumb hang off the IK target instead of the lower arm.
pub fn build_arm(armature: &mut Armature, arm: &ArmDescriptor) -> RigResult<usize> {
    let body = require_body(armature)?;
    let index = armature.arms.len();
    let namer = LimbNamer::new(armature.name(), Region::Arm, index, &arm.suffix);

    let shoulder = if arm.shoulder {
        let rib_tail = armature[body.rib].tail();
        Some(armature.create_bone(namer.name("shoulder"), rib_tail, arm.upper, Some(body.rib))?)
    } else {
        None
    };
    let upper_arm = armature.create_bone(namer.name("upper_arm"), arm.upper, arm.lower, shoulder)?;
    let lower_arm =
        armature.create_bone(namer.name("lower_arm"), arm.lower, arm.wrist, Some(upper_arm))?;

    let hand = arm
        .hand_point()
        .map(|point| armature.create_bone(namer.name("hand"), arm.wrist, point, Some(lower_arm)))
        .transpose()?;
    let thumb = arm
        .thumb_point()
        .map(|point| armature.create_bone(namer.name("thumb"), arm.wrist, point, Some(lower_arm)))
        .transpose()?;

    let (elbow, ik) = if arm.ik {
        let (elbow, target) =
            build_ik_handles(armature, namer.name("elbow"), namer.name("ik"), arm.lower, arm.wrist)?;
        for bone in [hand, thumb].into_iter().flatten() {
            armature.reparent(bone, Some(target), false)?;
        }
        attach_ik(armature, lower_arm, upper_arm, target, elbow, LIMB_CHAIN_LENGTH)?;
        (Some(elbow), Some(target))
    } else {
        (None, None)
    };

    armature.arms.push(ArmBones {
        suffix: arm.suffix.clone(),
        shoulder,
        upper_arm,
        lower_arm,
        hand,
        thumb,
        elbow,
        ik,
    });
    Ok(index)
}

/// Builds a leg. Returns the leg's index.
///
/// The hip starts at the rib's head and is parented to the rib without a
/// rigid connection. Without a hip the upper leg is left unparented for the
/// controller pass. With IK, the foot hangs off the IK target.
pub fn build_leg(armature: &mut Armature, leg: &LegDescriptor) -> RigResult<usize> {
    let body = require_body(armature)?;
    let index = armature.legs.len();
    let namer = LimbNamer::new(armature.name(), Region::Leg, index, &leg.suffix);

    let hip = if leg.hip {
        let rib_head = armature[body.rib].head();
        let hip = armature.create_bone(namer.name("hip"), rib_head, leg.upper, None)?;
        armature.reparent(hip, Some(body.rib), false)?;
        Some(hip)
    } else {
        None
    };
    let upper_leg = armature.create_bone(namer.name("upper_leg"), leg.upper, leg.lower, hip)?;
    let lower_leg =
        armature.create_bone(namer.name("lower_leg"), leg.lower, leg.knee, Some(upper_leg))?;
    let foot = armature.create_bone(namer.name("foot"), leg.knee, leg.foot, Some(lower_leg))?;

    let (knee, ik) = if leg.ik {
        let (knee, target) =
            build_ik_handles(armature, namer.name("knee"), namer.name("ik"), leg.lower, leg.knee)?;
        armature.reparent(foot, Some(target), false)?;
        attach_ik(armature, lower_leg, upper_leg, target, knee, LIMB_CHAIN_LENGTH)?;
        (Some(knee), Some(target))
    } else {
        (None, None)
    };

    armature.legs.push(LegBones {
        suffix: leg.suffix.clone(),
        hip,
        upper_leg,
        lower_leg,
        foot,
        knee,
        ik,
    });
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chest() -> ChestDescriptor {
        ChestDescriptor::new(
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, 1.5),
            Vec3::new(0.0, 0.0, 2.0),
        )
    }

    fn arm() -> ArmDescriptor {
        ArmDescriptor::new(
            "L",
            Vec3::new(0.2, 0.0, 1.8),
            Vec3::new(0.6, 0.0, 1.6),
            Vec3::new(1.0, 0.0, 1.6),
        )
    }

    fn leg() -> LegDescriptor {
        LegDescriptor::new(
            "L",
            Vec3::new(0.15, 0.0, 1.0),
            Vec3::new(0.15, 0.0, 0.5),
            Vec3::new(0.15, 0.0, 0.1),
            Vec3::new(0.15, 0.3, 0.0),
        )
    }

    fn with_chest() -> Armature {
        let mut armature = Armature::new("Rig");
        build_chest(&mut armature, &chest()).unwrap();
        armature
    }

    #[test]
    fn test_chest_adopts_default_bone() {
        let armature = with_chest();
        let body = armature.body().unwrap();

        assert_eq!(armature.len(), 2);
        assert_eq!(body.rib, armature.first_bone().unwrap());
        assert_eq!(armature[body.rib].name(), "Rig.rib");
        assert_eq!(armature[body.rib].head(), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(armature[body.chest].parent(), Some(body.rib));
        assert!(armature[body.chest].is_connected());
    }

    #[test]
    fn test_limbs_need_chest() {
        let mut armature = Armature::new("Rig");
        assert!(matches!(
            build_arm(&mut armature, &arm()),
            Err(RigError::UnknownReference { .. })
        ));
    }

    #[test]
    fn test_head() {
        let mut armature = with_chest();
        let head = HeadDescriptor::new("", Vec3::new(0.0, 0.0, 2.2), Vec3::new(0.0, 0.0, 2.6));
        assert_eq!(build_head(&mut armature, &head).unwrap(), 0);
        assert_eq!(build_head(&mut armature, &head).unwrap(), 1);

        let names = armature.heads()[1].bone_names(&armature);
        assert_eq!(names["neck"], "Rig.head.1.neck.");
        assert_eq!(names["head"], "Rig.head.1.head.");
    }

    #[test]
    fn test_arm_without_ik() {
        let mut armature = with_chest();
        build_arm(&mut armature, &arm()).unwrap();

        let record = &armature.arms()[0];
        assert_eq!(record.bones().count(), 3);
        assert_eq!(record.hand, None);
        assert_eq!(record.thumb, None);
        assert_eq!(armature[record.upper_arm].parent(), record.shoulder);
        assert!(armature.constraints().is_empty());
    }

    #[test]
    fn test_arm_without_shoulder_is_left_unparented() {
        let mut armature = with_chest();
        build_arm(&mut armature, &arm().with_shoulder(false)).unwrap();

        let record = &armature.arms()[0];
        assert_eq!(record.shoulder, None);
        assert_eq!(armature[record.upper_arm].parent(), None);
    }

    #[test]
    fn test_arm_with_ik_moves_hand_to_target() {
        let mut armature = with_chest();
        let arm = arm()
            .with_ik(true)
            .with_hand(Vec3::new(1.2, 0.0, 1.6))
            .with_thumb(Vec3::new(1.1, -0.1, 1.6));
        build_arm(&mut armature, &arm).unwrap();

        let record = armature.arms()[0].clone();
        let target = record.ik.unwrap();
        let elbow = record.elbow.unwrap();

        assert_eq!(armature[target].head(), Vec3::new(1.0, 0.0, 1.6));
        assert_eq!(armature[target].tail(), Vec3::new(1.0, 0.5, 1.6));
        assert!(armature[elbow]
            .head()
            .abs_diff_eq(Vec3::new(0.6, -1.5, 1.4), 1e-6));
        assert!(!armature[target].is_deform());
        assert!(!armature[elbow].is_deform());

        for bone in [record.hand.unwrap(), record.thumb.unwrap()] {
            assert_eq!(armature[bone].parent(), Some(target));
            assert!(!armature[bone].is_connected());
        }

        let constraint = armature.constraint_on(record.lower_arm).unwrap();
        assert_eq!(constraint.target, target);
        assert_eq!(constraint.pole, elbow);
        assert_eq!(constraint.name, "Rig.arm.0.lower_arm.L.ik");
    }

    #[test]
    fn test_leg() {
        let mut armature = with_chest();
        build_leg(&mut armature, &leg()).unwrap();

        let record = armature.legs()[0].clone();
        let hip = record.hip.unwrap();
        let rib = armature.body().unwrap().rib;

        assert_eq!(armature[hip].head(), armature[rib].head());
        assert_eq!(armature[hip].parent(), Some(rib));
        assert!(!armature[hip].is_connected());
        assert!(armature[record.foot].is_connected());
        assert_eq!(record.bones().count(), 4);
    }

    #[test]
    fn test_leg_with_ik() {
        let mut armature = with_chest();
        build_leg(&mut armature, &leg().with_ik(true)).unwrap();

        let record = armature.legs()[0].clone();
        let target = record.ik.unwrap();
        assert_eq!(armature[target].head(), Vec3::new(0.15, 0.0, 0.1));
        assert_eq!(armature[record.foot].parent(), Some(target));
        assert_eq!(
            record.bone_names(&armature).keys().copied().collect::<Vec<_>>(),
            vec!["foot", "hip", "ik", "knee", "lower_leg", "upper_leg"]
        );
    }
}
