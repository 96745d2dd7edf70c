//! Global controller attachment.

use glam::Vec3;

use crate::armature::{Armature, BoneId};
use crate::error::{RigError, RigResult};
use crate::naming::body_bone_name;

pub const CONTROL_HEAD: Vec3 = Vec3::ZERO;
pub const CONTROL_TAIL: Vec3 = Vec3::new(0.0, -2.0, 0.0);

/// Ties loose limbs to the body and optionally adds a global control bone.
///
/// Upper arms without a shoulder and upper legs without a hip are always
/// parented to the rib, unconnected. With `enable_global_handle`, a
/// non-deforming `<armature>.control` bone becomes the parent of the rib and
/// of every IK target and pole bone.
///
/// Call once per build. Returns the control bone if one was created.
pub fn attach_controller(
    armature: &mut Armature,
    enable_global_handle: bool,
) -> RigResult<Option<BoneId>> {
    let rib = armature
        .body()
        .map(|body| body.rib)
        .ok_or_else(|| RigError::unknown_reference(body_bone_name(armature.name(), "rib")))?;

    let loose: Vec<BoneId> = armature
        .arms()
        .iter()
        .filter(|arm| arm.shoulder.is_none())
        .map(|arm| arm.upper_arm)
        .chain(
            armature
                .legs()
                .iter()
                .filter(|leg| leg.hip.is_none())
                .map(|leg| leg.upper_leg),
        )
        .collect();
    for bone in loose {
        armature.reparent(bone, Some(rib), false)?;
    }

    if !enable_global_handle {
        return Ok(None);
    }

    let name = body_bone_name(armature.name(), "control");
    let control = armature.create_bone(name, CONTROL_HEAD, CONTROL_TAIL, None)?;
    armature.set_deform(control, false)?;
    armature.reparent(rib, Some(control), false)?;

    let handles: Vec<BoneId> = armature
        .arms()
        .iter()
        .flat_map(|arm| [arm.ik, arm.elbow])
        .chain(armature.legs().iter().flat_map(|leg| [leg.ik, leg.knee]))
        .flatten()
        .collect();
    for bone in handles {
        armature.reparent(bone, Some(control), false)?;
    }

    armature.control = Some(control);
    Ok(Some(control))
}
