//! Error types for rig construction.

use flexrig_profile::MemberKind;
use thiserror::Error;

/// Result type for rig operations.
pub type RigResult<T> = Result<T, RigError>;

/// Errors that can occur while building or binding a rig.
///
/// Any of these aborts the build: the orchestrator never hands out a
/// partially built armature.
#[derive(Debug, Error)]
pub enum RigError {
    /// A bone has zero length or no defined orientation.
    #[error("bone '{name}' is degenerate (zero length or undefined orientation)")]
    DegenerateBone { name: String },

    /// A bone name is already taken in this armature.
    #[error("bone name '{name}' is already used in this armature")]
    DuplicateName { name: String },

    /// A bone reference does not resolve in this armature.
    #[error("bone '{name}' does not exist in this armature")]
    UnknownReference { name: String },

    /// A rigid connection was requested between bones that do not touch.
    #[error("bone '{child}' cannot connect to '{parent}': its head is not on the parent's tail")]
    Disconnected { child: String, parent: String },

    /// A re-parent would make a bone its own ancestor.
    #[error("bone '{child}' cannot be parented under its own descendant '{parent}'")]
    Cycle { child: String, parent: String },

    /// The pole lies on the IK axis, so no bend plane can be derived.
    #[error("pole bone '{bone}' is collinear with its IK chain, no pole angle exists")]
    CollinearPole { bone: String },

    /// The host does not know an object named in a skin binding.
    #[error("object '{name}' not found in the host scene")]
    UnknownObject { name: String },

    /// A failure inside one head, arm, or leg build.
    #[error("{kind} #{index} (suffix '{suffix}'): {source}")]
    Limb {
        kind: MemberKind,
        index: usize,
        suffix: String,
        #[source]
        source: Box<RigError>,
    },
}

impl RigError {
    /// Creates a new degenerate bone error.
    pub fn degenerate_bone(name: impl Into<String>) -> Self {
        Self::DegenerateBone { name: name.into() }
    }

    /// Creates a new duplicate name error.
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    /// Creates a new unknown reference error.
    pub fn unknown_reference(name: impl Into<String>) -> Self {
        Self::UnknownReference { name: name.into() }
    }

    /// Wraps this error with the profile member it happened in.
    pub fn in_member(self, kind: MemberKind, index: usize, suffix: impl Into<String>) -> Self {
        Self::Limb {
            kind,
            index,
            suffix: suffix.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping member context.
    pub fn root_cause(&self) -> &RigError {
        match self {
            RigError::Limb { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Get the error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            RigError::DegenerateBone { .. } => "RIG_001",
            RigError::DuplicateName { .. } => "RIG_002",
            RigError::UnknownReference { .. } => "RIG_003",
            RigError::Disconnected { .. } => "RIG_004",
            RigError::CollinearPole { .. } => "RIG_005",
            RigError::UnknownObject { .. } => "RIG_006",
            RigError::Cycle { .. } => "RIG_007",
            RigError::Limb { source, .. } => source.code(),
        }
    }

    /// Get the error category for grouping related errors.
    pub fn category(&self) -> &'static str {
        "rig"
    }
}
