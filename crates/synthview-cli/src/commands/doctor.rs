//! Doctor command implementation
//!
//! Checks system dependencies and configuration.

use std::env;
use std::process::{Command, ExitCode};

use anyhow::Result;
use colored::Colorize;
use synthview_backend_blender::Orchestrator;

/// Run the doctor command
///
/// Checks:
/// - Blender installation
/// - Output directory permissions
/// - Version information
///
/// # Returns
/// Exit code: 0 if all checks pass, 1 if any fail
pub fn run() -> Result<ExitCode> {
    println!("{}", "Synthview Doctor".cyan().bold());
    println!("{}", "================".cyan());
    println!();

    let mut all_ok = true;

    // Check 1: version information
    println!("{}", "Versions:".bold());
    println!(
        "  {} synthview-cli v{}",
        "->".green(),
        env!("CARGO_PKG_VERSION")
    );
    match get_rustc_version() {
        Some(version) => {
            println!("  {} rustc {}", "->".green(), version);
        }
        None => {
            println!("  {} rustc (not found)", "->".yellow());
        }
    }

    println!();

    // Check 2: Blender installation
    println!("{}", "Dependencies:".bold());
    match check_blender() {
        BlenderStatus::Found(version) => {
            println!("  {} {}", "ok".green(), version);
        }
        BlenderStatus::NotFound => {
            println!("  {} Blender not found", "!!".red());
            println!(
                "     {}",
                "Blender is required for rendering. Install it or set BLENDER_PATH.".dimmed()
            );
            all_ok = false;
        }
        BlenderStatus::Error(message) => {
            println!("  {} Blender check failed: {}", "!!".red(), message);
            all_ok = false;
        }
    }

    println!();

    // Check 3: output directory permissions
    println!("{}", "Permissions:".bold());
    match env::current_dir() {
        Ok(dir) => {
            let test_file = dir.join(".synthview_write_test");
            match std::fs::write(&test_file, "test") {
                Ok(_) => {
                    let _ = std::fs::remove_file(&test_file);
                    println!(
                        "  {} Current directory is writable ({})",
                        "ok".green(),
                        dir.display()
                    );
                }
                Err(err) => {
                    println!("  {} Cannot write to current directory: {}", "!!".red(), err);
                    all_ok = false;
                }
            }
        }
        Err(err) => {
            println!("  {} Cannot determine current directory: {}", "!!".red(), err);
            all_ok = false;
        }
    }

    println!();

    // Summary
    if all_ok {
        println!("{} All checks passed!", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} Some checks failed. See above for details.",
            "WARNING".yellow().bold()
        );
        Ok(ExitCode::from(1))
    }
}

/// Status of the Blender installation check
enum BlenderStatus {
    Found(String),
    NotFound,
    Error(String),
}

fn check_blender() -> BlenderStatus {
    let path = match Orchestrator::new().find_blender() {
        Ok(path) => path,
        Err(_) => return BlenderStatus::NotFound,
    };

    match Command::new(&path).arg("--version").output() {
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let version = stdout
                .lines()
                .next()
                .unwrap_or("Blender (unknown version)")
                .trim()
                .to_string();
            BlenderStatus::Found(format!("{} ({})", version, path.display()))
        }
        Err(err) => BlenderStatus::Error(err.to_string()),
    }
}

fn get_rustc_version() -> Option<String> {
    let output = Command::new("rustc").arg("--version").output().ok()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .next()
        .map(|line| line.trim_start_matches("rustc ").trim().to_string())
}
