//! The armature: an ordered bone table plus the IK constraints and limb
//! records layered on top of it.
//!
//! Bones refer to each other through [`BoneId`]s, indices into the table that
//! stay valid for the armature's lifetime. Names are the user-facing
//! identifier only and are kept unique through a side index.

use std::collections::HashMap;
use std::ops::Index;

use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{RigError, RigResult};
use crate::limbs::{ArmBones, BodyBones, HeadBones, LegBones};
use crate::math::bone_x_axis;

/// Name the host gives the bone it seeds into a fresh armature.
pub const DEFAULT_BONE_NAME: &str = "Bone";

/// Suffix of the armature data block name.
pub const DATA_SUFFIX: &str = "amt";

/// Stable handle to a bone in one armature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoneId(usize);

impl BoneId {
    /// Position of the bone in creation order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// An oriented head to tail segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    name: String,
    head: Vec3,
    tail: Vec3,
    parent: Option<BoneId>,
    connected: bool,
    deform: bool,
}

impl Bone {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn head(&self) -> Vec3 {
        self.head
    }

    pub fn tail(&self) -> Vec3 {
        self.tail
    }

    pub fn parent(&self) -> Option<BoneId> {
        self.parent
    }

    /// True if the head is rigidly attached to the parent's tail.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// True if the bone deforms skinned geometry.
    pub fn is_deform(&self) -> bool {
        self.deform
    }

    /// Head to tail vector.
    pub fn vector(&self) -> Vec3 {
        self.tail - self.head
    }

    pub fn length(&self) -> f32 {
        self.vector().length()
    }

    /// Local X axis at zero roll, `None` for a degenerate bone.
    pub fn x_axis(&self) -> Option<Vec3> {
        bone_x_axis(self.head, self.tail)
    }
}

/// An inverse kinematics constraint owned by the chain's base bone.
#[derive(Debug, Clone, PartialEq)]
pub struct IkConstraint {
    /// Constraint name, `<bone>.ik`.
    pub name: String,
    /// Bone that carries the constraint (the distal end of the chain).
    pub bone: BoneId,
    /// Bone whose tail the chain reaches for.
    pub target: BoneId,
    /// Bone whose head orients the bend plane.
    pub pole: BoneId,
    /// Number of bones solved, counting `bone` itself.
    pub chain_length: u8,
    /// Rotation in radians about the chain axis toward the pole.
    pub pole_angle: f32,
}

/// A named bone hierarchy.
#[derive(Debug, Clone)]
pub struct Armature {
    name: String,
    data_name: String,
    bones: Vec<Bone>,
    by_name: HashMap<String, BoneId>,
    constraints: Vec<IkConstraint>,
    pub(crate) body: Option<BodyBones>,
    pub(crate) heads: Vec<HeadBones>,
    pub(crate) arms: Vec<ArmBones>,
    pub(crate) legs: Vec<LegBones>,
    pub(crate) control: Option<BoneId>,
}

impl Armature {
    /// Creates an armature holding the host's default root bone.
    ///
    /// The data block is named `<name>.amt`. The seeded bone is named
    /// [`DEFAULT_BONE_NAME`] and runs from the origin one unit up Z.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let data_name = format!("{}.{}", name, DATA_SUFFIX);
        let mut armature = Self {
            name,
            data_name,
            bones: Vec::new(),
            by_name: HashMap::new(),
            constraints: Vec::new(),
            body: None,
            heads: Vec::new(),
            arms: Vec::new(),
            legs: Vec::new(),
            control: None,
        };
        armature.push_bone(Bone {
            name: DEFAULT_BONE_NAME.to_string(),
            head: Vec3::ZERO,
            tail: Vec3::Z,
            parent: None,
            connected: false,
            deform: true,
        });
        armature
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the armature data block.
    pub fn data_name(&self) -> &str {
        &self.data_name
    }

    fn push_bone(&mut self, bone: Bone) -> BoneId {
        let id = BoneId(self.bones.len());
        self.by_name.insert(bone.name.clone(), id);
        self.bones.push(bone);
        id
    }

    fn check_new_name(&self, name: &str) -> RigResult<()> {
        if self.by_name.contains_key(name) {
            return Err(RigError::duplicate_name(name));
        }
        Ok(())
    }

    fn check_segment(name: &str, head: Vec3, tail: Vec3) -> RigResult<()> {
        if head == tail || bone_x_axis(head, tail).is_none() {
            return Err(RigError::degenerate_bone(name));
        }
        Ok(())
    }

    /// Adds a bone. A bone with a parent is rigidly connected to it.
    ///
    /// The head is not moved onto the parent's tail; a head elsewhere fails
    /// with [`RigError::Disconnected`].
    pub fn create_bone(
        &mut self,
        name: impl Into<String>,
        head: Vec3,
        tail: Vec3,
        parent: Option<BoneId>,
    ) -> RigResult<BoneId> {
        let name = name.into();
        self.check_new_name(&name)?;
        Self::check_segment(&name, head, tail)?;

        if let Some(parent_id) = parent {
            let parent_bone = self.bone(parent_id)?;
            if parent_bone.tail != head {
                return Err(RigError::Disconnected {
                    child: name,
                    parent: parent_bone.name.clone(),
                });
            }
        }

        debug!("bone '{}' {} -> {}", name, head, tail);
        Ok(self.push_bone(Bone {
            name,
            head,
            tail,
            parent,
            connected: parent.is_some(),
            deform: true,
        }))
    }

    /// Changes a bone's parent. `connected` requires touching endpoints.
    pub fn reparent(
        &mut self,
        child: BoneId,
        parent: Option<BoneId>,
        connected: bool,
    ) -> RigResult<()> {
        let child_bone = self.bone(child)?;
        match parent {
            Some(parent_id) => {
                let parent_bone = self.bone(parent_id)?;
                if parent_id == child || self.is_ancestor(child, parent_id) {
                    return Err(RigError::Cycle {
                        child: child_bone.name.clone(),
                        parent: parent_bone.name.clone(),
                    });
                }
                if connected && child_bone.head != parent_bone.tail {
                    return Err(RigError::Disconnected {
                        child: child_bone.name.clone(),
                        parent: parent_bone.name.clone(),
                    });
                }
                debug!(
                    "reparent '{}' under '{}'{}",
                    child_bone.name,
                    parent_bone.name,
                    if connected { " (connected)" } else { "" }
                );
            }
            None => debug!("unparent '{}'", child_bone.name),
        }

        let bone = &mut self.bones[child.0];
        bone.parent = parent;
        bone.connected = connected && parent.is_some();
        Ok(())
    }

    /// True if `ancestor` is on the parent chain of `bone`.
    pub fn is_ancestor(&self, ancestor: BoneId, bone: BoneId) -> bool {
        let mut current = self.get(bone).and_then(Bone::parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).and_then(Bone::parent);
        }
        false
    }

    pub fn set_deform(&mut self, id: BoneId, deform: bool) -> RigResult<()> {
        self.bone(id)?;
        self.bones[id.0].deform = deform;
        Ok(())
    }

    /// Renames a bone. Renaming a bone to its current name does nothing.
    pub fn rename(&mut self, id: BoneId, name: impl Into<String>) -> RigResult<()> {
        let name = name.into();
        let old = self.bone(id)?.name.clone();
        if old == name {
            return Ok(());
        }
        self.check_new_name(&name)?;

        self.by_name.remove(&old);
        self.by_name.insert(name.clone(), id);
        debug!("rename '{}' -> '{}'", old, name);
        self.bones[id.0].name = name;
        Ok(())
    }

    /// Moves both endpoints of a bone.
    ///
    /// Children connected to the bone are not moved along; the caller keeps
    /// them consistent.
    pub fn set_endpoints(&mut self, id: BoneId, head: Vec3, tail: Vec3) -> RigResult<()> {
        let bone = self.bone(id)?;
        Self::check_segment(&bone.name, head, tail)?;
        if let Some(parent) = bone.parent.filter(|_| bone.connected) {
            if self.bones[parent.0].tail != head {
                return Err(RigError::Disconnected {
                    child: bone.name.clone(),
                    parent: self.bones[parent.0].name.clone(),
                });
            }
        }

        let bone = &mut self.bones[id.0];
        bone.head = head;
        bone.tail = tail;
        Ok(())
    }

    pub fn get(&self, id: BoneId) -> Option<&Bone> {
        self.bones.get(id.0)
    }

    /// Looks up a bone, failing for ids from another armature.
    pub fn bone(&self, id: BoneId) -> RigResult<&Bone> {
        self.get(id)
            .ok_or_else(|| RigError::unknown_reference(format!("#{}", id.0)))
    }

    pub fn find(&self, name: &str) -> Option<BoneId> {
        self.by_name.get(name).copied()
    }

    /// Looks up a bone by name.
    pub fn bone_by_name(&self, name: &str) -> RigResult<&Bone> {
        self.find(name)
            .map(|id| &self.bones[id.0])
            .ok_or_else(|| RigError::unknown_reference(name))
    }

    /// First bone in the table, the host's root bone before the chest adopts it.
    pub fn first_bone(&self) -> Option<BoneId> {
        (!self.bones.is_empty()).then_some(BoneId(0))
    }

    /// Bones in creation order.
    pub fn bones(&self) -> impl Iterator<Item = (BoneId, &Bone)> {
        self.bones.iter().enumerate().map(|(i, b)| (BoneId(i), b))
    }

    pub fn children(&self, id: BoneId) -> impl Iterator<Item = BoneId> + '_ {
        self.bones()
            .filter(move |(_, b)| b.parent == Some(id))
            .map(|(child, _)| child)
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    pub(crate) fn push_constraint(&mut self, constraint: IkConstraint) {
        self.constraints.push(constraint);
    }

    pub fn constraints(&self) -> &[IkConstraint] {
        &self.constraints
    }

    /// The IK constraint carried by a bone, if any.
    pub fn constraint_on(&self, bone: BoneId) -> Option<&IkConstraint> {
        self.constraints.iter().find(|c| c.bone == bone)
    }

    /// Rib and chest bones, once the chest is built.
    pub fn body(&self) -> Option<&BodyBones> {
        self.body.as_ref()
    }

    pub fn heads(&self) -> &[HeadBones] {
        &self.heads
    }

    pub fn arms(&self) -> &[ArmBones] {
        &self.arms
    }

    pub fn legs(&self) -> &[LegBones] {
        &self.legs
    }

    /// The global control bone, if one was attached.
    pub fn control(&self) -> Option<BoneId> {
        self.control
    }
}

impl Index<BoneId> for Armature {
    type Output = Bone;

    fn index(&self, id: BoneId) -> &Bone {
        &self.bones[id.0]
    }
}
