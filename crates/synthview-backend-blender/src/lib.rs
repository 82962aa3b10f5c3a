//! Synthview Blender Backend
//!
//! This crate renders synthetic training images of 3D shape models by
//! driving Blender as a subprocess. Camera poses come from
//! `synthview-pose`; this crate owns everything on the host-application
//! side of that seam.
//!
//! # Architecture
//!
//! The backend uses a two-part architecture:
//!
//! 1. **Rust orchestrator** - Computes camera poses and lighting, writes a
//!    job JSON, spawns Blender, and collects results
//! 2. **Python entrypoint** - Runs inside Blender to import the model,
//!    place lights, assign the precomputed poses, and render
//!
//! Communication happens via JSON files:
//! - The job JSON is written to a temp file and passed to Blender
//! - The entrypoint writes a report JSON with the rendered views
//!
//! The entrypoint does no pose math; a given job file always describes the
//! same images.
//!
//! # Example
//!
//! ```ignore
//! use synthview_backend_blender::{render, OrchestratorConfig, RenderRequest};
//! use synthview_backend_blender::lighting::LightingConfig;
//! use synthview_pose::parse_view_params;
//!
//! let viewpoints = parse_view_params("45 20 0 2.5\n135 20 0 2.5\n")?;
//! let request = RenderRequest::new("chair.obj", "03001627", "abc123", viewpoints, "out");
//! let outcome = render(&request, &LightingConfig::default(), OrchestratorConfig::default())?;
//! for image in &outcome.images {
//!     println!("rendered {}", image.display());
//! }
//! ```
//!
//! # Blender Requirements
//!
//! This crate requires Blender to be installed. The orchestrator searches
//! for Blender in:
//!
//! 1. `BLENDER_PATH` environment variable
//! 2. System PATH
//! 3. Common installation locations (platform-specific)
//!
//! # Crate Structure
//!
//! - [`job`] - Render job types and the job-file wire format
//! - [`report`] - Report types written back by the entrypoint
//! - [`lighting`] - Lighting configuration and sampling
//! - [`orchestrator`] - Blender subprocess management
//! - [`rng`] - Deterministic RNG for seeded lighting
//! - [`error`] - Error types

pub mod error;
pub mod job;
pub mod lighting;
pub mod orchestrator;
pub mod report;
pub mod rng;

use std::path::PathBuf;

// Re-export main types at crate root
pub use error::{RenderError, RenderResult};
pub use job::{image_filename, PointLight, RenderJob, RenderRequest, ViewJob};
pub use lighting::{LightingConfig, ViewLighting};
pub use orchestrator::{Orchestrator, OrchestratorConfig, DEFAULT_TIMEOUT_SECS};
pub use report::{RenderReport, RenderedView};
pub use rng::DeterministicRng;

/// Result of rendering a request.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    /// Paths of the rendered images, in view order.
    pub images: Vec<PathBuf>,
    /// The report written by the entrypoint.
    pub report: RenderReport,
}

/// Renders every viewpoint of a request through Blender.
///
/// Creates the output directory, builds the job (poses, filenames,
/// lighting), runs the orchestrator, and verifies that every reported image
/// exists on disk.
pub fn render(
    request: &RenderRequest,
    lighting: &LightingConfig,
    config: OrchestratorConfig,
) -> RenderResult<RenderOutcome> {
    std::fs::create_dir_all(&request.output_dir)?;

    let job = RenderJob::from_request(request, lighting)?;
    let orchestrator = Orchestrator::with_config(config);
    let report = orchestrator.run_with_job(&job)?;

    let mut images = Vec::with_capacity(report.views.len());
    for view in &report.views {
        let path = request.output_dir.join(&view.filename);
        if !path.exists() {
            return Err(RenderError::OutputNotFound { path });
        }
        images.push(path);
    }

    Ok(RenderOutcome { images, report })
}
