//! Validate command implementation
//!
//! Validates every profile in a profile file.

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use flexrig_profile::{validate_profile, ValidationResult};

use super::json_output::{ProfileDiagnostics, ValidateOutput};
use crate::input::load_library;

/// Run the validate command
///
/// # Arguments
/// * `profile_path` - Path to the profile file
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if every profile is valid, 1 otherwise
pub fn run(profile_path: &str, json_output: bool) -> Result<ExitCode> {
    let library = load_library(profile_path)?;
    let results: Vec<(&str, ValidationResult)> = library
        .profiles()
        .iter()
        .map(|p| (p.name.as_str(), validate_profile(p)))
        .collect();
    let ok = results.iter().all(|(_, r)| r.is_ok());

    if json_output {
        let output = ValidateOutput {
            ok,
            profiles: results
                .iter()
                .map(|(name, result)| ProfileDiagnostics::new(name, result))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} {}", "Validating:".cyan().bold(), profile_path);
        for (name, result) in &results {
            let status = if result.is_ok() {
                "ok".green()
            } else {
                "invalid".red()
            };
            println!("\n{} {} ({})", "Profile:".bold(), name, status);
            print_diagnostics(result);
        }

        let failed = results.iter().filter(|(_, r)| !r.is_ok()).count();
        if ok {
            println!(
                "\n{} {} profile(s) valid",
                "SUCCESS".green().bold(),
                results.len()
            );
        } else {
            println!(
                "\n{} {} of {} profile(s) have errors",
                "FAILED".red().bold(),
                failed,
                results.len()
            );
        }
    }

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::from(1) })
}

/// Prints errors and warnings of one validation result.
pub(crate) fn print_diagnostics(result: &ValidationResult) {
    for error in &result.errors {
        let path_info = error
            .path
            .as_ref()
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();
        println!(
            "  {} [{}]{}: {}",
            "x".red(),
            error.code.to_string().red(),
            path_info.dimmed(),
            error.message
        );
    }

    for warning in &result.warnings {
        let path_info = warning
            .path
            .as_ref()
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();
        println!(
            "  {} [{}]{}: {}",
            "!".yellow(),
            warning.code.to_string().yellow(),
            path_info.dimmed(),
            warning.message
        );
    }
}
