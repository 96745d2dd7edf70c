//! Flexrig CLI - build humanoid armatures from body profiles
//!
//! This binary provides commands for validating and editing profile files and
//! for building rigs from them.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use flexrig_cli::{commands, logging};
use flexrig_profile::MemberRef;

/// Flexrig - Procedural Humanoid Rig Builder
#[derive(Parser)]
#[command(name = "flexrig")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an armature from a profile and report its bones
    Build {
        /// Path to the profile file (JSON)
        #[arg(short, long)]
        profile: String,

        /// Profile to build (default: first in the file)
        #[arg(short, long)]
        name: Option<String>,

        /// Armature name used as the bone name prefix
        #[arg(short, long)]
        armature: Option<String>,

        /// Write the rig report JSON to this file
        #[arg(short, long)]
        output: Option<String>,

        /// Print the rig report as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Validate every profile in a profile file
    Validate {
        /// Path to the profile file (JSON)
        #[arg(short, long)]
        profile: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List the profiles in a profile file
    List {
        /// Path to the profile file (JSON)
        #[arg(short, long)]
        profile: String,
    },

    /// Mirror one head, arm, or leg of a profile
    Mirror {
        /// Path to the profile file (JSON)
        #[arg(short, long)]
        profile: String,

        /// Profile to edit (default: first in the file)
        #[arg(short, long)]
        name: Option<String>,

        /// Member to mirror, e.g. arms:0
        #[arg(short, long)]
        member: MemberRef,

        /// Axes to reflect across
        #[arg(long, default_value = "x")]
        axis: String,

        /// Mirror a copy of the member and keep the original
        #[arg(long)]
        duplicate: bool,

        /// Save to this file instead of overwriting the profile file
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Build {
            profile,
            name,
            armature,
            output,
            json,
        } => commands::build::run(
            &profile,
            name.as_deref(),
            armature.as_deref(),
            output.as_deref(),
            json,
        ),
        Commands::Validate { profile, json } => commands::validate::run(&profile, json),
        Commands::List { profile } => commands::list::run(&profile),
        Commands::Mirror {
            profile,
            name,
            member,
            axis,
            duplicate,
            output,
        } => commands::mirror::run(
            &profile,
            name.as_deref(),
            member,
            &axis,
            duplicate,
            output.as_deref(),
        ),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
