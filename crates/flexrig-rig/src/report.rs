//! Serializable rig reports.

use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::armature::{Armature, BoneId};

/// One bone as reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneReport {
    pub name: String,
    pub head: Vec3,
    pub tail: Vec3,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub connected: bool,
    pub deform: bool,
}

/// One IK constraint as reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IkReport {
    pub name: String,
    pub bone: String,
    pub target: String,
    pub pole: String,
    pub chain_length: u8,
    /// Radians.
    pub pole_angle: f32,
}

/// Snapshot of a built armature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigReport {
    pub armature: String,
    pub data: String,
    pub bone_count: usize,
    pub deform_bone_count: usize,
    pub constraint_count: usize,
    /// Bones in creation order.
    pub bones: Vec<BoneReport>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<IkReport>,
    #[serde(default)]
    pub body: BTreeMap<String, String>,
    #[serde(default)]
    pub heads: Vec<BTreeMap<String, String>>,
    #[serde(default)]
    pub arms: Vec<BTreeMap<String, String>>,
    #[serde(default)]
    pub legs: Vec<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control: Option<String>,
}

fn owned(names: BTreeMap<&'static str, String>) -> BTreeMap<String, String> {
    names.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

impl RigReport {
    pub fn from_armature(armature: &Armature) -> Self {
        let name_of = |id: BoneId| armature[id].name().to_string();

        let bones: Vec<BoneReport> = armature
            .bones()
            .map(|(_, bone)| BoneReport {
                name: bone.name().to_string(),
                head: bone.head(),
                tail: bone.tail(),
                parent: bone.parent().map(name_of),
                connected: bone.is_connected(),
                deform: bone.is_deform(),
            })
            .collect();

        let constraints: Vec<IkReport> = armature
            .constraints()
            .iter()
            .map(|c| IkReport {
                name: c.name.clone(),
                bone: name_of(c.bone),
                target: name_of(c.target),
                pole: name_of(c.pole),
                chain_length: c.chain_length,
                pole_angle: c.pole_angle,
            })
            .collect();

        Self {
            armature: armature.name().to_string(),
            data: armature.data_name().to_string(),
            bone_count: bones.len(),
            deform_bone_count: bones.iter().filter(|b| b.deform).count(),
            constraint_count: constraints.len(),
            bones,
            constraints,
            body: armature
                .body()
                .map(|body| owned(body.bone_names(armature)))
                .unwrap_or_default(),
            heads: armature
                .heads()
                .iter()
                .map(|h| owned(h.bone_names(armature)))
                .collect(),
            arms: armature
                .arms()
                .iter()
                .map(|a| owned(a.bone_names(armature)))
                .collect(),
            legs: armature
                .legs()
                .iter()
                .map(|l| owned(l.bone_names(armature)))
                .collect(),
            control: armature.control().map(name_of),
        }
    }

    /// Looks up a reported bone by name.
    pub fn bone(&self, name: &str) -> Option<&BoneReport> {
        self.bones.iter().find(|b| b.name == name)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
