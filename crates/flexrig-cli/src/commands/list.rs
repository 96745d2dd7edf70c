//! List command implementation

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use flexrig_profile::{MemberKind, Profile};

use crate::input::load_library;

/// One line of the listing.
pub fn describe(profile: &Profile) -> String {
    let ik_limbs = profile.arms.iter().filter(|a| a.ik).count()
        + profile.legs.iter().filter(|l| l.ik).count();
    format!(
        "{} head(s), {} arm(s), {} leg(s), {} with ik, control {}",
        profile.member_count(MemberKind::Heads),
        profile.member_count(MemberKind::Arms),
        profile.member_count(MemberKind::Legs),
        ik_limbs,
        if profile.control { "on" } else { "off" }
    )
}

/// Run the list command
pub fn run(profile_path: &str) -> Result<ExitCode> {
    let library = load_library(profile_path)?;

    if library.is_empty() {
        println!("{} no profiles in {}", "!".yellow(), profile_path);
        return Ok(ExitCode::SUCCESS);
    }
    for profile in library.profiles() {
        println!("{}  {}", profile.name.bold(), describe(profile).dimmed());
    }
    Ok(ExitCode::SUCCESS)
}
