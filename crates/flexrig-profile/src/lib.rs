//! Flexrig Profile Library
//!
//! This crate provides the types, JSON schema, and validation for Flexrig body
//! profiles. A profile is a declarative set of landmark positions (chest,
//! heads, arms, legs) that the rig builder turns into an armature.
//!
//! # Example
//!
//! ```
//! use flexrig_profile::{ArmDescriptor, Profile, validate_profile};
//! use glam::Vec3;
//!
//! let profile = Profile::builder("Biped")
//!     .chest(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, 1.5), Vec3::new(0.0, 0.0, 2.0))
//!     .arm(ArmDescriptor::new(
//!         "L",
//!         Vec3::new(0.2, 0.0, 1.8),
//!         Vec3::new(0.6, 0.0, 1.6),
//!         Vec3::new(1.0, 0.0, 1.6),
//!     ))
//!     .build();
//!
//! assert!(validate_profile(&profile).is_ok());
//!
//! let json = profile.to_json_pretty().unwrap();
//! assert_eq!(Profile::from_json(&json).unwrap(), profile);
//! ```
//!
//! # Modules
//!
//! - [`profile`]: Profile and member descriptor types
//! - [`landmark`]: The zero-vector "absent" convention for optional landmarks
//! - [`library`]: Multi-profile files
//! - [`edit`]: Mirroring and duplicating members
//! - [`validation`]: Profile validation
//! - [`error`]: Error and warning types

pub mod edit;
pub mod error;
pub mod landmark;
pub mod library;
pub mod profile;
pub mod validation;

pub use edit::Symmetry;
pub use error::{
    ErrorCode, ProfileError, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
pub use landmark::{is_absent, present};
pub use library::ProfileLibrary;
pub use profile::{
    ArmDescriptor, ChestDescriptor, HeadDescriptor, LegDescriptor, MemberKind, MemberRef,
    Profile, ProfileBuilder, DEFAULT_ARMATURE_NAME,
};
pub use validation::{is_valid_name, is_valid_suffix, validate_profile, MAX_NAME_LEN};
