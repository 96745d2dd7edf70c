//! Profile and member descriptor types.
//!
//! A profile is the declarative landmark description one rig is built from:
//! the chest landmarks plus ordered lists of heads, arms, and legs. Field names
//! follow the on-disk profile format so files written by the host add-on load
//! unchanged.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ProfileError;
use crate::landmark::present;

/// Default armature name used when the caller does not pick one.
pub const DEFAULT_ARMATURE_NAME: &str = "Flexrig.Armature";

fn default_true() -> bool {
    true
}

/// Chest landmarks: stomach, chest, and top of the chest (neck base).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChestDescriptor {
    /// Stomach point, head of the root `rib` bone.
    #[serde(default)]
    pub rib: Vec3,
    /// Chest point, tail of `rib` and head of `chest`.
    #[serde(default)]
    pub chest: Vec3,
    /// Top of the chest, tail of the `chest` bone.
    #[serde(default)]
    pub tchest: Vec3,
}

impl ChestDescriptor {
    /// Creates chest landmarks from stomach, chest, and top-chest points.
    pub fn new(rib: Vec3, chest: Vec3, tchest: Vec3) -> Self {
        Self { rib, chest, tchest }
    }
}

/// A neck and head pair.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeadDescriptor {
    /// Cosmetic label appended to generated bone names.
    #[serde(default)]
    pub suffix: String,
    /// Tail of the neck bone.
    #[serde(default)]
    pub neck: Vec3,
    /// Tail of the head bone.
    #[serde(default)]
    pub head: Vec3,
}

impl HeadDescriptor {
    pub fn new(suffix: impl Into<String>, neck: Vec3, head: Vec3) -> Self {
        Self {
            suffix: suffix.into(),
            neck,
            head,
        }
    }
}

/// An arm: upper arm, forearm, optional hand and thumb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmDescriptor {
    /// Cosmetic label appended to generated bone names.
    #[serde(default)]
    pub suffix: String,
    /// Shoulder joint, head of the upper arm.
    #[serde(default)]
    pub upper: Vec3,
    /// Elbow joint, head of the lower arm.
    #[serde(default)]
    pub lower: Vec3,
    /// Wrist joint, tail of the lower arm.
    #[serde(default)]
    pub wrist: Vec3,
    /// Hand tip. The zero vector means "no hand".
    #[serde(default)]
    pub hand: Vec3,
    /// Thumb tip. The zero vector means "no thumb".
    #[serde(default)]
    pub thumb: Vec3,
    /// Create a shoulder bone from the rib tail to the upper arm.
    #[serde(default = "default_true")]
    pub shoulder: bool,
    /// Rig the arm with an IK chain, elbow pole, and IK target.
    #[serde(default)]
    pub ik: bool,
}

impl ArmDescriptor {
    /// Creates an arm with a shoulder, no IK, and no hand or thumb.
    pub fn new(suffix: impl Into<String>, upper: Vec3, lower: Vec3, wrist: Vec3) -> Self {
        Self {
            suffix: suffix.into(),
            upper,
            lower,
            wrist,
            hand: Vec3::ZERO,
            thumb: Vec3::ZERO,
            shoulder: true,
            ik: false,
        }
    }

    pub fn with_shoulder(mut self, shoulder: bool) -> Self {
        self.shoulder = shoulder;
        self
    }

    pub fn with_ik(mut self, ik: bool) -> Self {
        self.ik = ik;
        self
    }

    pub fn with_hand(mut self, hand: Vec3) -> Self {
        self.hand = hand;
        self
    }

    pub fn with_thumb(mut self, thumb: Vec3) -> Self {
        self.thumb = thumb;
        self
    }

    /// Hand tip, or `None` when the hand landmark is the zero sentinel.
    pub fn hand_point(&self) -> Option<Vec3> {
        present(self.hand)
    }

    /// Thumb tip, or `None` when either the thumb or the hand is absent.
    pub fn thumb_point(&self) -> Option<Vec3> {
        self.hand_point().and(present(self.thumb))
    }
}

/// A leg: upper leg, shin, and foot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegDescriptor {
    /// Cosmetic label appended to generated bone names.
    #[serde(default)]
    pub suffix: String,
    /// Hip joint, head of the upper leg.
    #[serde(default)]
    pub upper: Vec3,
    /// Knee joint, head of the lower leg.
    #[serde(default)]
    pub lower: Vec3,
    /// Heel, tail of the lower leg and head of the foot.
    #[serde(default)]
    pub knee: Vec3,
    /// Toe, tail of the foot.
    #[serde(default)]
    pub foot: Vec3,
    /// Create a hip bone from the rib head to the upper leg.
    #[serde(default = "default_true")]
    pub hip: bool,
    /// Rig the leg with an IK chain, knee pole, and IK target.
    #[serde(default)]
    pub ik: bool,
}

impl LegDescriptor {
    /// Creates a leg with a hip and no IK.
    pub fn new(suffix: impl Into<String>, upper: Vec3, lower: Vec3, knee: Vec3, foot: Vec3) -> Self {
        Self {
            suffix: suffix.into(),
            upper,
            lower,
            knee,
            foot,
            hip: true,
            ik: false,
        }
    }

    pub fn with_hip(mut self, hip: bool) -> Self {
        self.hip = hip;
        self
    }

    pub fn with_ik(mut self, ik: bool) -> Self {
        self.ik = ik;
        self
    }
}

/// The member lists of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Heads,
    Arms,
    Legs,
}

impl MemberKind {
    /// Returns the JSON key of this member list.
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Heads => "heads",
            MemberKind::Arms => "arms",
            MemberKind::Legs => "legs",
        }
    }

    /// Returns the singular name of one member.
    pub fn label(&self) -> &'static str {
        match self {
            MemberKind::Heads => "head",
            MemberKind::Arms => "arm",
            MemberKind::Legs => "leg",
        }
    }
}

impl std::fmt::Display for MemberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for MemberKind {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heads" | "head" => Ok(MemberKind::Heads),
            "arms" | "arm" => Ok(MemberKind::Arms),
            "legs" | "leg" => Ok(MemberKind::Legs),
            _ => Err(ProfileError::InvalidSelector(s.to_string())),
        }
    }
}

/// A member selector such as `arms:1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberRef {
    pub kind: MemberKind,
    pub index: usize,
}

impl std::str::FromStr for MemberRef {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, index) = s
            .split_once(':')
            .ok_or_else(|| ProfileError::InvalidSelector(s.to_string()))?;
        let kind = kind
            .parse::<MemberKind>()
            .map_err(|_| ProfileError::InvalidSelector(s.to_string()))?;
        let index = index
            .parse::<usize>()
            .map_err(|_| ProfileError::InvalidSelector(s.to_string()))?;
        Ok(MemberRef { kind, index })
    }
}

/// A complete body profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Profile name.
    #[serde(default)]
    pub name: String,
    /// Chest landmarks, stored flat at the profile level.
    #[serde(flatten)]
    pub chest: ChestDescriptor,
    /// Create a global control bone that owns the rib and all IK handles.
    #[serde(default = "default_true")]
    pub control: bool,
    /// Heads in build order.
    #[serde(default)]
    pub heads: Vec<HeadDescriptor>,
    /// Arms in build order.
    #[serde(default)]
    pub arms: Vec<ArmDescriptor>,
    /// Legs in build order.
    #[serde(default)]
    pub legs: Vec<LegDescriptor>,
}

impl Profile {
    /// Creates a new profile builder.
    pub fn builder(name: impl Into<String>) -> ProfileBuilder {
        ProfileBuilder::new(name)
    }

    /// Parses a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the profile to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Returns the number of members of the given kind.
    pub fn member_count(&self, kind: MemberKind) -> usize {
        match kind {
            MemberKind::Heads => self.heads.len(),
            MemberKind::Arms => self.arms.len(),
            MemberKind::Legs => self.legs.len(),
        }
    }

    pub(crate) fn check_member(&self, member: MemberRef) -> Result<(), ProfileError> {
        let len = self.member_count(member.kind);
        if member.index >= len {
            return Err(ProfileError::MemberOutOfRange {
                kind: member.kind,
                index: member.index,
                len,
            });
        }
        Ok(())
    }
}

/// Builder for creating profiles programmatically.
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    name: String,
    chest: ChestDescriptor,
    control: bool,
    heads: Vec<HeadDescriptor>,
    arms: Vec<ArmDescriptor>,
    legs: Vec<LegDescriptor>,
}

impl ProfileBuilder {
    /// Creates a new profile builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chest: ChestDescriptor::default(),
            control: true,
            heads: Vec::new(),
            arms: Vec::new(),
            legs: Vec::new(),
        }
    }

    /// Sets the chest landmarks.
    pub fn chest(mut self, rib: Vec3, chest: Vec3, tchest: Vec3) -> Self {
        self.chest = ChestDescriptor::new(rib, chest, tchest);
        self
    }

    /// Enables or disables the global control bone.
    pub fn control(mut self, control: bool) -> Self {
        self.control = control;
        self
    }

    /// Appends a head.
    pub fn head(mut self, head: HeadDescriptor) -> Self {
        self.heads.push(head);
        self
    }

    /// Appends an arm.
    pub fn arm(mut self, arm: ArmDescriptor) -> Self {
        self.arms.push(arm);
        self
    }

    /// Appends a leg.
    pub fn leg(mut self, leg: LegDescriptor) -> Self {
        self.legs.push(leg);
        self
    }

    /// Builds the profile.
    pub fn build(self) -> Profile {
        Profile {
            name: self.name,
            chest: self.chest,
            control: self.control,
            heads: self.heads,
            arms: self.arms,
            legs: self.legs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_host_profile() {
        let json = r#"{
            "name": "Biped",
            "rib": [0.0, 0.0, 1.0],
            "chest": [0.0, 0.0, 1.5],
            "tchest": [0.0, 0.0, 2.0],
            "control": false,
            "heads": [{"suffix": "", "neck": [0.0, 0.0, 2.2], "head": [0.0, 0.0, 2.6]}],
            "arms": [{
                "suffix": "L",
                "upper": [0.2, 0.0, 1.8], "lower": [0.6, 0.0, 1.6], "wrist": [1.0, 0.0, 1.6],
                "thumb": [0.0, 0.0, 0.0], "hand": [1.2, 0.0, 1.6],
                "shoulder": true, "ik": true
            }],
            "legs": [{
                "suffix": "L",
                "upper": [0.15, 0.0, 1.0], "lower": [0.15, 0.0, 0.5],
                "knee": [0.15, 0.0, 0.1], "foot": [0.15, 0.3, 0.0],
                "hip": false, "ik": false
            }]
        }"#;

        let profile = Profile::from_json(json).expect("should parse");
        assert_eq!(profile.name, "Biped");
        assert_eq!(profile.chest.tchest, Vec3::new(0.0, 0.0, 2.0));
        assert!(!profile.control);
        assert_eq!(profile.heads.len(), 1);
        assert_eq!(profile.arms[0].hand_point(), Some(Vec3::new(1.2, 0.0, 1.6)));
        assert_eq!(profile.arms[0].thumb_point(), None);
        assert!(profile.arms[0].ik);
        assert!(!profile.legs[0].hip);
    }

    #[test]
    fn test_missing_fields_use_host_defaults() {
        let profile = Profile::from_json(r#"{"name": "Empty", "arms": [{}], "legs": [{}]}"#)
            .expect("should parse");
        assert!(profile.control);
        assert_eq!(profile.chest, ChestDescriptor::default());
        assert!(profile.arms[0].shoulder);
        assert!(!profile.arms[0].ik);
        assert!(profile.legs[0].hip);
        assert_eq!(profile.arms[0].suffix, "");
    }

    #[test]
    fn test_json_round_trip() {
        let profile = Profile::builder("Round")
            .chest(Vec3::Z, Vec3::new(0.0, 0.0, 1.5), Vec3::new(0.0, 0.0, 2.0))
            .control(false)
            .head(HeadDescriptor::new("", Vec3::new(0.0, 0.0, 2.2), Vec3::new(0.0, 0.0, 2.6)))
            .arm(
                ArmDescriptor::new(
                    "R",
                    Vec3::new(-0.2, 0.0, 1.8),
                    Vec3::new(-0.6, 0.0, 1.6),
                    Vec3::new(-1.0, 0.0, 1.6),
                )
                .with_ik(true)
                .with_hand(Vec3::new(-1.2, 0.0, 1.6))
                .with_thumb(Vec3::new(-1.1, 0.1, 1.6)),
            )
            .build();

        let json = profile.to_json_pretty().unwrap();
        let parsed = Profile::from_json(&json).unwrap();
        assert_eq!(profile, parsed);
        assert!(json.contains("\"tchest\""));
        assert!(!json.contains("\"chest\": {"));
    }

    #[test]
    fn test_thumb_requires_hand() {
        let arm = ArmDescriptor::new("L", Vec3::X, Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0))
            .with_thumb(Vec3::new(3.0, 0.2, 0.0));
        assert_eq!(arm.hand_point(), None);
        assert_eq!(arm.thumb_point(), None);
    }

    #[test]
    fn test_member_ref_parse() {
        let member: MemberRef = "arms:2".parse().unwrap();
        assert_eq!(member.kind, MemberKind::Arms);
        assert_eq!(member.index, 2);

        let member: MemberRef = "leg:0".parse().unwrap();
        assert_eq!(member.kind, MemberKind::Legs);

        assert!("tails:0".parse::<MemberRef>().is_err());
        assert!("arms".parse::<MemberRef>().is_err());
        assert!("arms:x".parse::<MemberRef>().is_err());
    }
}
