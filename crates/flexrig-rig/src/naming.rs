//! Bone naming.
//!
//! Body bones are `<armature>.<part>`. Limb bones are
//! `<armature>.<region>.<index>.<part>.<suffix>`; the index keeps names
//! unique when suffixes repeat.

use std::fmt;

/// Region a limb bone belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Head,
    Arm,
    Leg,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Head => "head",
            Region::Arm => "arm",
            Region::Leg => "leg",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of a bone on the body itself (rib, chest, control).
pub fn body_bone_name(armature: &str, part: &str) -> String {
    format!("{}.{}", armature, part)
}

/// Name of a bone inside one head, arm, or leg.
pub fn limb_bone_name(armature: &str, region: Region, index: usize, part: &str, suffix: &str) -> String {
    format!("{}.{}.{}.{}.{}", armature, region, index, part, suffix)
}

/// Builds the names of one limb's bones.
#[derive(Debug, Clone)]
pub(crate) struct LimbNamer {
    armature: String,
    region: Region,
    index: usize,
    suffix: String,
}

impl LimbNamer {
    pub(crate) fn new(armature: &str, region: Region, index: usize, suffix: &str) -> Self {
        Self {
            armature: armature.to_string(),
            region,
            index,
            suffix: suffix.to_string(),
        }
    }

    pub(crate) fn name(&self, part: &str) -> String {
        limb_bone_name(&self.armature, self.region, self.index, part, &self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(body_bone_name("Rig", "rib"), "Rig.rib");
        assert_eq!(
            limb_bone_name("Rig", Region::Arm, 1, "upper_arm", "R"),
            "Rig.arm.1.upper_arm.R"
        );
        assert_eq!(limb_bone_name("Rig", Region::Head, 0, "neck", ""), "Rig.head.0.neck.");
    }

    #[test]
    fn test_namer() {
        let namer = LimbNamer::new("Rig", Region::Leg, 2, "L");
        assert_eq!(namer.name("foot"), "Rig.leg.2.foot.L");
    }
}
