//! Flexrig Rig Builder
//!
//! Turns a [`Profile`](flexrig_profile::Profile) into an [`Armature`]: a named
//! bone hierarchy with a rib and chest, any number of heads, arms, and legs,
//! optional two-bone IK on the limbs, and an optional global control bone.
//!
//! # Example
//!
//! ```
//! use flexrig_profile::{ArmDescriptor, Profile};
//! use flexrig_rig::{build_rig, RigReport};
//! use glam::Vec3;
//!
//! let profile = Profile::builder("Biped")
//!     .chest(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, 1.5), Vec3::new(0.0, 0.0, 2.0))
//!     .arm(
//!         ArmDescriptor::new(
//!             "L",
//!             Vec3::new(0.2, 0.0, 1.8),
//!             Vec3::new(0.6, 0.0, 1.6),
//!             Vec3::new(1.0, 0.0, 1.6),
//!         )
//!         .with_ik(true),
//!     )
//!     .build();
//!
//! let armature = build_rig(&profile, "Flexrig.Armature").unwrap();
//! assert_eq!(armature.constraints().len(), 1);
//!
//! let report = RigReport::from_armature(&armature);
//! assert_eq!(report.arms[0]["ik"], "Flexrig.Armature.arm.0.ik.L");
//! ```
//!
//! # Build stages
//!
//! 1. [`build_chest`] adopts the armature's default bone as the rib.
//! 2. [`build_head`], [`build_arm`], and [`build_leg`] append one member each.
//!    Limbs with IK get pole and target bones and an [`IkConstraint`].
//! 3. [`attach_controller`] ties loose limbs to the rib and adds the control bone.
//!
//! [`build_rig`] runs all of them in profile order.

pub mod armature;
pub mod controller;
pub mod error;
pub mod ik;
pub mod limbs;
pub mod link;
pub mod math;
pub mod naming;
pub mod orchestrator;
pub mod report;

pub use armature::{Armature, Bone, BoneId, IkConstraint, DEFAULT_BONE_NAME};
pub use controller::attach_controller;
pub use error::{RigError, RigResult};
pub use ik::{attach_ik, pole_angle, LIMB_CHAIN_LENGTH};
pub use limbs::{
    build_arm, build_chest, build_head, build_leg, ArmBones, BodyBones, HeadBones, LegBones,
    RoleNames,
};
pub use link::{link_to_object, SkinHost};
pub use math::bone_x_axis;
pub use naming::{body_bone_name, limb_bone_name, Region};
pub use orchestrator::build_rig;
pub use report::{BoneReport, IkReport, RigReport};
