//! Build command implementation
//!
//! Builds an armature from one profile and reports its bones.

use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use flexrig_profile::{is_valid_name, validate_profile, DEFAULT_ARMATURE_NAME, MAX_NAME_LEN};
use flexrig_rig::{build_rig, RigReport};

use super::json_output::ProfileDiagnostics;
use super::validate::print_diagnostics;
use crate::input::{load_library, write_output};

/// Run the build command
///
/// # Arguments
/// * `profile_path` - Path to the profile file
/// * `profile_name` - Profile to build (default: first in the file)
/// * `armature_name` - Name of the armature (default: `Flexrig.Armature`)
/// * `output` - Report output path (default: stdout)
/// * `json_output` - Print the report as JSON instead of a summary
///
/// # Returns
/// Exit code: 0 if the rig was built, 1 if the profile is invalid
///
/// # Errors
/// Fails if the file cannot be loaded, the profile is not found, or the
/// armature name cannot prefix bone names.
pub fn run(
    profile_path: &str,
    profile_name: Option<&str>,
    armature_name: Option<&str>,
    output: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    let library = load_library(profile_path)?;
    let profile = library.select(profile_name)?;
    let armature_name = armature_name.unwrap_or(DEFAULT_ARMATURE_NAME);
    if !is_valid_name(armature_name) {
        bail!(
            "Invalid armature name '{}': must be non-empty and at most {} bytes",
            armature_name,
            MAX_NAME_LEN
        );
    }

    let validation = validate_profile(profile);
    if !validation.is_ok() {
        if json_output {
            let diagnostics = ProfileDiagnostics::new(&profile.name, &validation);
            println!("{}", serde_json::to_string_pretty(&diagnostics)?);
        } else {
            println!("{} {}", "Profile:".bold(), profile.name);
            print_diagnostics(&validation);
            println!(
                "\n{} Profile has {} error(s), nothing built",
                "FAILED".red().bold(),
                validation.errors.len()
            );
        }
        return Ok(ExitCode::from(1));
    }

    let armature = build_rig(profile, armature_name)
        .with_context(|| format!("Failed to build rig from profile '{}'", profile.name))?;
    let report = RigReport::from_armature(&armature);

    if json_output || output.is_some() {
        write_output(output, &report.to_json_pretty()?)?;
    }
    if !json_output {
        print_summary(&report, &profile.name);
        if !validation.warnings.is_empty() {
            println!();
            print_diagnostics(&validation);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_summary(report: &RigReport, profile_name: &str) {
    println!(
        "{} {} ({}) from profile {}",
        "Armature:".cyan().bold(),
        report.armature,
        report.data.dimmed(),
        profile_name
    );
    println!(
        "  {} bones ({} deforming), {} ik constraint(s)",
        report.bone_count, report.deform_bone_count, report.constraint_count
    );

    for bone in &report.bones {
        let parent = match &bone.parent {
            Some(parent) if bone.connected => format!(" <- {}", parent),
            Some(parent) => format!(" <~ {}", parent),
            None => String::new(),
        };
        let marker = if bone.deform { " " } else { "*" };
        println!("  {}{}{}", marker.dimmed(), bone.name, parent.dimmed());
    }
    for ik in &report.constraints {
        println!(
            "  {} {} -> {} (pole {}, chain {}, angle {:.4})",
            "ik".yellow(),
            ik.bone,
            ik.target,
            ik.pole,
            ik.chain_length,
            ik.pole_angle
        );
    }

    println!("\n{} Rig built", "SUCCESS".green().bold());
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = r#"{
        "name": "Biped",
        "rib": [0, 0, 1], "chest": [0, 0, 1.5], "tchest": [0, 0, 2],
        "control": false,
        "arms": [{"suffix": "L", "upper": [0.2, 0, 1.8], "lower": [0.6, 0, 1.6],
                  "wrist": [1.0, 0, 1.6], "ik": true}]
    }"#;

    #[test]
    fn build_writes_report() {
        let tmp = tempfile::tempdir().unwrap();
        let profile_path = tmp.path().join("profile.json");
        std::fs::write(&profile_path, PROFILE).unwrap();
        let out = tmp.path().join("rig.json");

        let code = run(
            profile_path.to_str().unwrap(),
            None,
            Some("Test"),
            Some(out.to_str().unwrap()),
            false,
        )
        .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let report: RigReport =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(report.armature, "Test");
        assert_eq!(report.constraint_count, 1);
        assert!(report.bone("Test.arm.0.elbow.L").is_some());
    }

    #[test]
    fn build_refuses_invalid_profile() {
        let tmp = tempfile::tempdir().unwrap();
        let profile_path = tmp.path().join("profile.json");
        std::fs::write(
            &profile_path,
            r#"{"name": "Bad", "rib": [0, 0, 1], "chest": [0, 0, 1], "tchest": [0, 0, 2]}"#,
        )
        .unwrap();
        let out = tmp.path().join("rig.json");

        let code = run(
            profile_path.to_str().unwrap(),
            None,
            None,
            Some(out.to_str().unwrap()),
            true,
        )
        .unwrap();
        assert_eq!(code, ExitCode::from(1));
        assert!(!out.exists());
    }

    #[test]
    fn build_unknown_profile_name() {
        let tmp = tempfile::tempdir().unwrap();
        let profile_path = tmp.path().join("profile.json");
        std::fs::write(&profile_path, PROFILE).unwrap();

        let err = run(profile_path.to_str().unwrap(), Some("Quadruped"), None, None, true)
            .unwrap_err();
        assert!(err.to_string().contains("Quadruped"));
    }

    #[test]
    fn build_rejects_unusable_armature_name() {
        let tmp = tempfile::tempdir().unwrap();
        let profile_path = tmp.path().join("profile.json");
        std::fs::write(&profile_path, PROFILE).unwrap();
        let out = tmp.path().join("rig.json");
        let path = profile_path.to_str().unwrap();

        let long = "A".repeat(MAX_NAME_LEN + 1);
        for name in ["", "   ", long.as_str()] {
            let err = run(path, None, Some(name), Some(out.to_str().unwrap()), true).unwrap_err();
            assert!(err.to_string().contains("Invalid armature name"), "{}", err);
        }
        assert!(!out.exists());
    }
}
