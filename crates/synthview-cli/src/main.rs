//! Synthview command-line interface.
//!
//! Subcommand dispatch lives here; argument definitions are in
//! [`cli_args`] and implementations under [`commands`].

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

mod cli_args;
mod commands;

use cli_args::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            model,
            synset,
            model_id,
            views,
            out,
            seed,
            lighting,
            blender_path,
            timeout_secs,
            json,
        } => commands::render::run(
            &model,
            &synset,
            &model_id,
            &views,
            &out,
            seed,
            lighting.as_deref(),
            blender_path.as_deref(),
            timeout_secs,
            json,
        ),
        Commands::Orbit {
            model,
            out,
            num_images,
            elevation,
            tilt,
            distance,
            width,
            height,
            prefix,
            seed,
            blender_path,
        } => commands::orbit::run(
            &model,
            &out,
            num_images,
            elevation,
            tilt,
            distance,
            width,
            height,
            &prefix,
            seed,
            blender_path.as_deref(),
        ),
        Commands::Pose {
            azimuth,
            elevation,
            tilt,
            distance,
            json,
        } => commands::pose::run(azimuth, elevation, tilt, distance, json),
        Commands::Doctor => commands::doctor::run(),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {:#}", "ERROR".red().bold(), err);
            ExitCode::from(1)
        }
    }
}
