//! Mirror command implementation
//!
//! Reflects (and optionally duplicates) one member of a profile, then writes
//! the library back.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use flexrig_profile::{MemberRef, ProfileError, Symmetry};

use crate::input::load_library;

/// Run the mirror command
///
/// # Arguments
/// * `profile_path` - Path to the profile file
/// * `profile_name` - Profile to edit (default: first in the file)
/// * `member` - Member to mirror, e.g. `arms:0`
/// * `axes` - Axes to reflect across, e.g. `x`
/// * `duplicate` - Mirror a new copy of the member instead of the member itself
/// * `output` - Where to save the library (default: overwrite `profile_path`)
pub fn run(
    profile_path: &str,
    profile_name: Option<&str>,
    member: MemberRef,
    axes: &str,
    duplicate: bool,
    output: Option<&str>,
) -> Result<ExitCode> {
    let symmetry = Symmetry::from_axes(axes)
        .ok_or_else(|| anyhow!("invalid axes '{}' (expected letters from x, y, z)", axes))?;

    let mut library = load_library(profile_path)?;
    let profile = match profile_name {
        Some(name) => library
            .find_mut(name)
            .ok_or_else(|| ProfileError::ProfileNotFound(name.to_string()))?,
        None => library
            .profiles_mut()
            .first_mut()
            .ok_or(ProfileError::EmptyLibrary)?,
    };

    let target = if duplicate {
        let index = profile.duplicate_member(member)?;
        MemberRef { index, ..member }
    } else {
        member
    };
    profile.mirror_member(target, symmetry)?;
    let profile_name = profile.name.clone();

    let destination = output.unwrap_or(profile_path);
    library
        .save(Path::new(destination))
        .with_context(|| format!("Failed to save profile file: {}", destination))?;

    println!(
        "{} {} #{} of {} across {} -> {}",
        "Mirrored".green().bold(),
        target.kind,
        target.index,
        profile_name,
        axes,
        destination
    );
    Ok(ExitCode::SUCCESS)
}
