//! Render command implementation
//!
//! Renders a shape model from the viewpoints listed in a parameter file.

use std::fs;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use synthview_backend_blender::{
    render, LightingConfig, OrchestratorConfig, RenderError, RenderRequest,
};
use synthview_pose::parse_view_params;

/// Run the render command
///
/// # Arguments
/// * `model` - Path to the .obj shape model
/// * `synset` - Category synset string
/// * `model_id` - Model identifier used in output names
/// * `views_path` - Path to the view-parameter file
/// * `out` - Output directory
/// * `seed` - Lighting seed; `None` selects fixed lighting
/// * `lighting_path` - Optional lighting-config JSON path
/// * `blender_path` - Optional Blender executable override
/// * `timeout_secs` - Optional Blender timeout override
/// * `json` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 success, 1 input error, 2 render error
#[allow(clippy::too_many_arguments)]
pub fn run(
    model: &str,
    synset: &str,
    model_id: &str,
    views_path: &str,
    out: &str,
    seed: Option<u32>,
    lighting_path: Option<&str>,
    blender_path: Option<&str>,
    timeout_secs: Option<u64>,
    json: bool,
) -> Result<ExitCode> {
    let lighting = match lighting_path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read lighting config: {}", path))?;
            serde_json::from_str::<LightingConfig>(&content)
                .with_context(|| format!("Failed to parse lighting config: {}", path))?
        }
        None => LightingConfig::default(),
    };

    let views_content = fs::read_to_string(views_path)
        .with_context(|| format!("Failed to read view-parameter file: {}", views_path))?;

    let viewpoints = match parse_view_params(&views_content) {
        Ok(viewpoints) => viewpoints,
        Err(err) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "ok": false,
                        "error": { "kind": "view_params", "message": err.to_string() },
                    })
                );
            } else {
                eprintln!("{} {}", "Invalid view parameters:".red().bold(), err);
            }
            return Ok(ExitCode::from(1));
        }
    };

    if viewpoints.is_empty() {
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "ok": false,
                    "error": { "kind": "view_params", "message": "no viewpoints in file" },
                })
            );
        } else {
            eprintln!("{} {}", "No viewpoints in".red().bold(), views_path);
        }
        return Ok(ExitCode::from(1));
    }

    if !json {
        println!("{} {}", "Rendering:".cyan().bold(), model);
        println!("{} {}", "Viewpoints:".cyan().bold(), viewpoints.len());
        println!("{} {}", "Output dir:".cyan().bold(), out);
        match seed {
            Some(seed) => println!("{} randomized (seed {})", "Lighting:".dimmed(), seed),
            None => println!("{} fixed", "Lighting:".dimmed()),
        }
    }

    let mut request = RenderRequest::new(model, synset, model_id, viewpoints, out);
    if let Some(seed) = seed {
        request = request.seed(seed);
    }

    let mut config = OrchestratorConfig::default();
    if let Some(path) = blender_path {
        config = config.blender_path(path);
    }
    if let Some(secs) = timeout_secs {
        config = config.timeout(Duration::from_secs(secs));
    }

    match render(&request, &lighting, config) {
        Ok(outcome) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "ok": true,
                        "images": outcome.images,
                        "blender_version": outcome.report.blender_version,
                    })
                );
            } else {
                for image in &outcome.images {
                    println!("  {} {}", "ok".green(), image.display());
                }
                println!(
                    "{} {} images rendered",
                    "SUCCESS".green().bold(),
                    outcome.images.len()
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(report_render_error(&err, json)),
    }
}

pub(super) fn report_render_error(err: &RenderError, json: bool) -> ExitCode {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "ok": false,
                "error": {
                    "kind": err.category(),
                    "code": err.code(),
                    "message": err.to_string(),
                },
            })
        );
    } else {
        eprintln!(
            "{} [{}] {}",
            "Render failed:".red().bold(),
            err.code(),
            err
        );
    }
    ExitCode::from(2)
}
