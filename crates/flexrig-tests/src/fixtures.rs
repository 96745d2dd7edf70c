//! Reference profiles and profile files for tests.

use std::fs;
use std::path::{Path, PathBuf};

use flexrig_profile::{
    ArmDescriptor, HeadDescriptor, LegDescriptor, Profile, ProfileLibrary,
};
use glam::Vec3;
use tempfile::TempDir;

/// The reference arm: shoulder on, no IK, no hand or thumb.
pub fn reference_arm() -> ArmDescriptor {
    ArmDescriptor::new(
        "L",
        Vec3::new(0.2, 0.0, 1.8),
        Vec3::new(0.6, 0.0, 1.6),
        Vec3::new(1.0, 0.0, 1.6),
    )
}

/// The reference leg: hip on, no IK.
pub fn reference_leg() -> LegDescriptor {
    LegDescriptor::new(
        "L",
        Vec3::new(0.15, 0.0, 1.0),
        Vec3::new(0.15, 0.0, 0.5),
        Vec3::new(0.15, 0.0, 0.1),
        Vec3::new(0.15, 0.3, 0.0),
    )
}

/// One head, one arm, one leg, no control bone.
pub fn reference_profile() -> Profile {
    Profile::builder("Reference")
        .chest(
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, 1.5),
            Vec3::new(0.0, 0.0, 2.0),
        )
        .control(false)
        .head(HeadDescriptor::new(
            "",
            Vec3::new(0.0, 0.0, 2.2),
            Vec3::new(0.0, 0.0, 2.6),
        ))
        .arm(reference_arm())
        .leg(reference_leg())
        .build()
}

/// The reference profile with IK on the arm.
pub fn reference_profile_arm_ik() -> Profile {
    let mut profile = reference_profile();
    profile.arms[0].ik = true;
    profile
}

/// A full biped: both arms and legs with IK, hands and thumbs, and control.
pub fn biped() -> Profile {
    let mut profile = reference_profile();
    profile.name = "Biped".to_string();
    profile.control = true;

    let left = reference_arm()
        .with_ik(true)
        .with_hand(Vec3::new(1.2, 0.0, 1.6))
        .with_thumb(Vec3::new(1.1, -0.1, 1.6));
    let mut right = left.clone();
    right.suffix = "R".to_string();
    right.mirror(flexrig_profile::Symmetry::X);
    profile.arms = vec![left, right];

    let left = reference_leg().with_ik(true);
    let mut right = left.clone();
    right.suffix = "R".to_string();
    right.mirror(flexrig_profile::Symmetry::X);
    profile.legs = vec![left, right];

    profile
}

/// A temp directory holding one profile file.
pub struct ProfileFileFixture {
    pub root: TempDir,
    pub path: PathBuf,
}

impl ProfileFileFixture {
    /// Writes `profiles` as a library file.
    pub fn new(profiles: Vec<Profile>) -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let path = root.path().join("flexrig_profiles.json");
        ProfileLibrary::new(profiles)
            .save(&path)
            .expect("Failed to write profile file");
        Self { root, path }
    }

    /// Writes raw JSON as the profile file.
    pub fn raw(json: &str) -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let path = root.path().join("flexrig_profiles.json");
        fs::write(&path, json).expect("Failed to write profile file");
        Self { root, path }
    }

    pub fn path_str(&self) -> &str {
        self.path.to_str().expect("temp path is not UTF-8")
    }

    /// A path for command output inside the fixture directory.
    pub fn output(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    pub fn dir(&self) -> &Path {
        self.root.path()
    }
}

/// Path of the sample profile library shipped with the repository.
pub fn sample_profiles_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("profiles")
        .join("humanoid.json")
}
