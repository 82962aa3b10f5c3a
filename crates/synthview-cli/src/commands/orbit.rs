//! Orbit command implementation
//!
//! Renders evenly spaced azimuths around a model, then resizes the rendered
//! images to the requested dimensions.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use image::imageops::FilterType;
use synthview_backend_blender::{render, LightingConfig, OrchestratorConfig, RenderRequest};
use synthview_pose::Viewpoint;

/// Azimuth the orbit starts from, degrees.
const START_AZIMUTH_DEG: f64 = 270.0;

/// Run the orbit command
///
/// # Returns
/// Exit code: 0 success, 1 input error, 2 render error
#[allow(clippy::too_many_arguments)]
pub fn run(
    model: &str,
    out: &str,
    num_images: u32,
    elevation: f64,
    tilt: f64,
    distance: f64,
    width: u32,
    height: u32,
    prefix: &str,
    seed: Option<u32>,
    blender_path: Option<&str>,
) -> Result<ExitCode> {
    if num_images == 0 {
        eprintln!("{} --num-images must be at least 1", "ERROR".red().bold());
        return Ok(ExitCode::from(1));
    }
    if distance <= 0.0 {
        eprintln!("{} --distance must be positive", "ERROR".red().bold());
        return Ok(ExitCode::from(1));
    }

    let viewpoints = orbit_viewpoints(num_images, elevation, tilt, distance);

    println!("{} {}", "Orbit render:".cyan().bold(), model);
    println!(
        "{} {} views from azimuth {}",
        "Viewpoints:".cyan().bold(),
        viewpoints.len(),
        START_AZIMUTH_DEG
    );

    let model_id = Path::new(model)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string());

    let mut request = RenderRequest::new(model, prefix, model_id, viewpoints, out);
    if let Some(seed) = seed {
        request = request.seed(seed);
    }

    let mut config = OrchestratorConfig::default();
    if let Some(path) = blender_path {
        config = config.blender_path(path);
    }

    let outcome = match render(&request, &LightingConfig::default(), config) {
        Ok(outcome) => outcome,
        Err(err) => return Ok(super::render::report_render_error(&err, false)),
    };

    for path in &outcome.images {
        let img = image::open(path)
            .with_context(|| format!("Failed to open rendered image: {}", path.display()))?;
        img.resize_exact(width, height, FilterType::Nearest)
            .save(path)
            .with_context(|| format!("Failed to save resized image: {}", path.display()))?;
        println!("  {} {} ({}x{})", "ok".green(), path.display(), width, height);
    }

    println!(
        "{} {} images rendered",
        "SUCCESS".green().bold(),
        outcome.images.len()
    );
    Ok(ExitCode::SUCCESS)
}

/// Builds the orbit's viewpoints: `num_images` azimuths at `360/num_images`
/// degree spacing, starting from [`START_AZIMUTH_DEG`]. Azimuths past 360
/// are left unwrapped; the trigonometry wraps them and the output names
/// record them as given.
fn orbit_viewpoints(num_images: u32, elevation: f64, tilt: f64, distance: f64) -> Vec<Viewpoint> {
    let interval = 360.0 / num_images as f64;
    (0..num_images)
        .map(|i| {
            Viewpoint::new(
                START_AZIMUTH_DEG + interval * i as f64,
                elevation,
                tilt,
                distance,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_image_orbit_starts_at_270() {
        let views = orbit_viewpoints(1, 10.0, 0.0, 2.0);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].azimuth_deg, 270.0);
        assert_eq!(views[0].elevation_deg, 10.0);
    }

    #[test]
    fn test_orbit_spacing_is_even() {
        let views = orbit_viewpoints(4, 10.0, 0.0, 2.0);
        let azimuths: Vec<f64> = views.iter().map(|v| v.azimuth_deg).collect();
        assert_eq!(azimuths, vec![270.0, 360.0, 450.0, 540.0]);
    }
}
