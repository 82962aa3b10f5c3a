//! Pose command implementation
//!
//! Computes and prints the camera pose for one viewpoint without invoking
//! Blender. Useful for debugging viewpoint files and downstream consumers.

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use synthview_pose::Viewpoint;

/// Run the pose command
///
/// # Returns
/// Exit code: 0 success, 1 invalid viewpoint
pub fn run(azimuth: f64, elevation: f64, tilt: f64, distance: f64, json: bool) -> Result<ExitCode> {
    let viewpoint = Viewpoint::new(azimuth, elevation, tilt, distance);

    let pose = match viewpoint.camera_pose() {
        Ok(pose) => pose,
        Err(err) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({ "ok": false, "error": err.to_string() })
                );
            } else {
                eprintln!("{} {}", "Invalid viewpoint:".red().bold(), err);
            }
            return Ok(ExitCode::from(1));
        }
    };

    if json {
        println!(
            "{}",
            serde_json::json!({
                "ok": true,
                "viewpoint": viewpoint,
                "location": pose.location.to_array(),
                "rotation_wxyz": [
                    pose.rotation.w,
                    pose.rotation.x,
                    pose.rotation.y,
                    pose.rotation.z,
                ],
            })
        );
    } else {
        println!(
            "{} azimuth {}°, elevation {}°, tilt {}°, distance {}",
            "Viewpoint:".cyan().bold(),
            azimuth,
            elevation,
            tilt,
            distance
        );
        println!(
            "{} ({:.6}, {:.6}, {:.6})",
            "Location:".bold(),
            pose.location.x,
            pose.location.y,
            pose.location.z
        );
        println!(
            "{} ({:.6}, {:.6}, {:.6}, {:.6})  {}",
            "Rotation:".bold(),
            pose.rotation.w,
            pose.rotation.x,
            pose.rotation.y,
            pose.rotation.z,
            "(w, x, y, z)".dimmed()
        );
    }

    Ok(ExitCode::SUCCESS)
}
