//! Profile editing helpers: mirroring and duplicating members.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ProfileError;
use crate::profile::{ArmDescriptor, HeadDescriptor, LegDescriptor, MemberKind, MemberRef, Profile};

/// Axes to reflect across. `x: true` negates the X component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Symmetry {
    #[serde(default)]
    pub x: bool,
    #[serde(default)]
    pub y: bool,
    #[serde(default)]
    pub z: bool,
}

impl Symmetry {
    /// Reflection across the YZ plane (left/right).
    pub const X: Symmetry = Symmetry {
        x: true,
        y: false,
        z: false,
    };

    /// Parses an axis list such as `"x"` or `"xz"`.
    pub fn from_axes(axes: &str) -> Option<Self> {
        let mut symmetry = Symmetry::default();
        for c in axes.chars() {
            match c.to_ascii_lowercase() {
                'x' => symmetry.x = true,
                'y' => symmetry.y = true,
                'z' => symmetry.z = true,
                _ => return None,
            }
        }
        Some(symmetry)
    }

    fn factors(&self) -> Vec3 {
        let sign = |flip: bool| if flip { -1.0 } else { 1.0 };
        Vec3::new(sign(self.x), sign(self.y), sign(self.z))
    }

    /// Reflects a point. The zero sentinel maps to itself.
    pub fn apply(&self, point: Vec3) -> Vec3 {
        let reflected = point * self.factors();
        // -0.0 compares equal to 0.0 but prints as "-0.0"; keep files clean.
        reflected + Vec3::ZERO
    }
}

impl HeadDescriptor {
    pub fn mirror(&mut self, symmetry: Symmetry) {
        self.neck = symmetry.apply(self.neck);
        self.head = symmetry.apply(self.head);
    }
}

impl ArmDescriptor {
    pub fn mirror(&mut self, symmetry: Symmetry) {
        self.upper = symmetry.apply(self.upper);
        self.lower = symmetry.apply(self.lower);
        self.wrist = symmetry.apply(self.wrist);
        self.hand = symmetry.apply(self.hand);
        self.thumb = symmetry.apply(self.thumb);
    }
}

impl LegDescriptor {
    pub fn mirror(&mut self, symmetry: Symmetry) {
        self.upper = symmetry.apply(self.upper);
        self.lower = symmetry.apply(self.lower);
        self.knee = symmetry.apply(self.knee);
        self.foot = symmetry.apply(self.foot);
    }
}

impl Profile {
    /// Mirrors every landmark of one member in place.
    pub fn mirror_member(&mut self, member: MemberRef, symmetry: Symmetry) -> Result<(), ProfileError> {
        self.check_member(member)?;
        match member.kind {
            MemberKind::Heads => self.heads[member.index].mirror(symmetry),
            MemberKind::Arms => self.arms[member.index].mirror(symmetry),
            MemberKind::Legs => self.legs[member.index].mirror(symmetry),
        }
        Ok(())
    }

    /// Appends a copy of one member and returns the index of the copy.
    pub fn duplicate_member(&mut self, member: MemberRef) -> Result<usize, ProfileError> {
        self.check_member(member)?;
        let index = member.index;
        match member.kind {
            MemberKind::Heads => self.heads.push(self.heads[index].clone()),
            MemberKind::Arms => self.arms.push(self.arms[index].clone()),
            MemberKind::Legs => self.legs.push(self.legs[index].clone()),
        }
        Ok(self.member_count(member.kind) - 1)
    }
}
