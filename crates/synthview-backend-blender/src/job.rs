//! Render-job types and the job-file wire format.
//!
//! A [`RenderJob`] is written to a temp file as JSON and handed to the
//! Python entrypoint running inside Blender. Camera poses are computed here,
//! in Rust; the entrypoint only assigns them to the camera object and calls
//! the renderer.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use synthview_pose::Viewpoint;

use crate::error::RenderResult;
use crate::lighting::LightingConfig;
use crate::rng::DeterministicRng;

/// Default object vertex color (magenta, the legacy dataset convention).
pub const DEFAULT_VERTEX_COLOR: [f64; 3] = [1.0, 0.0, 1.0];

/// A request to render one shape model from a set of viewpoints.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Path to the .obj shape model.
    pub model_path: PathBuf,
    /// Category synset string, e.g. `03001627` for chairs.
    pub synset: String,
    /// Model identifier (the model's md5 in the legacy dataset layout).
    pub model_id: String,
    /// Camera viewpoints, rendered in order.
    pub viewpoints: Vec<Viewpoint>,
    /// Directory the rendered images are written to.
    pub output_dir: PathBuf,
    /// RGB vertex color applied to the whole mesh.
    pub vertex_color: [f64; 3],
    /// Seed for randomized lighting; `None` selects fixed lighting.
    pub seed: Option<u32>,
}

impl RenderRequest {
    /// Creates a request with fixed lighting and the default vertex color.
    pub fn new(
        model_path: impl Into<PathBuf>,
        synset: impl Into<String>,
        model_id: impl Into<String>,
        viewpoints: Vec<Viewpoint>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            model_path: model_path.into(),
            synset: synset.into(),
            model_id: model_id.into(),
            viewpoints,
            output_dir: output_dir.into(),
            vertex_color: DEFAULT_VERTEX_COLOR,
            seed: None,
        }
    }

    /// Sets the vertex color.
    pub fn vertex_color(mut self, color: [f64; 3]) -> Self {
        self.vertex_color = color;
        self
    }

    /// Enables randomized lighting with the given seed.
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// The job document consumed by the Python entrypoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderJob {
    /// Path to the .obj shape model.
    pub model_path: String,
    /// Directory the rendered images are written to.
    pub output_dir: String,
    /// RGB vertex color applied to the whole mesh.
    pub vertex_color: [f64; 3],
    /// Render with a transparent film so the background is alpha.
    pub transparent_film: bool,
    /// One entry per image, in render order.
    pub views: Vec<ViewJob>,
}

/// One view of a render job: output name, precomputed camera pose, lighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewJob {
    /// Output image filename, relative to the job's output directory.
    pub filename: String,
    /// The viewpoint this view was derived from (echoed into the report).
    pub viewpoint: Viewpoint,
    /// Camera location `[x, y, z]`.
    pub location: [f64; 3],
    /// Camera rotation quaternion `[w, x, y, z]`.
    pub rotation_wxyz: [f64; 4],
    /// Environment-light energy for this view.
    pub environment_energy: f64,
    /// Point lights for this view.
    pub lights: Vec<PointLight>,
}

/// A point light in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    /// World-space location `[x, y, z]`.
    pub location: [f64; 3],
    /// Lamp energy.
    pub energy: f64,
}

impl RenderJob {
    /// Builds the job for a request: computes every camera pose, names every
    /// output image, and attaches per-view lighting.
    ///
    /// With a seed on the request, lighting is drawn per view from a PCG32
    /// stream so the whole job is reproducible; without one, every view gets
    /// the fixed lighting.
    pub fn from_request(request: &RenderRequest, lighting: &LightingConfig) -> RenderResult<Self> {
        let mut rng = request.seed.map(DeterministicRng::new);

        let mut views = Vec::with_capacity(request.viewpoints.len());
        for viewpoint in &request.viewpoints {
            let pose = viewpoint.camera_pose()?;
            let view_lighting = match rng.as_mut() {
                Some(rng) => lighting.sample(rng),
                None => lighting.fixed(),
            };
            views.push(ViewJob {
                filename: image_filename(&request.synset, &request.model_id, viewpoint),
                viewpoint: *viewpoint,
                location: pose.location.to_array(),
                rotation_wxyz: [
                    pose.rotation.w,
                    pose.rotation.x,
                    pose.rotation.y,
                    pose.rotation.z,
                ],
                environment_energy: view_lighting.environment_energy,
                lights: view_lighting.lights,
            });
        }

        Ok(Self {
            model_path: request.model_path.to_string_lossy().into_owned(),
            output_dir: request.output_dir.to_string_lossy().into_owned(),
            vertex_color: request.vertex_color,
            transparent_film: true,
            views,
        })
    }

    /// Serializes the job to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses a job from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Formats the output image name for one viewpoint.
///
/// Fixed contract with existing datasets:
/// `{synset}_{model_id}_a{azimuth:03}_e{elevation:03}_t{tilt:03}_d{distance:03}.png`,
/// each value rounded to the nearest integer. The recorded tilt is the
/// viewpoint's tilt negated modulo 360 (Pascal3D annotation convention).
pub fn image_filename(synset: &str, model_id: &str, viewpoint: &Viewpoint) -> String {
    let tilt = (-viewpoint.tilt_deg).rem_euclid(360.0);
    format!(
        "{}_{}_a{:03}_e{:03}_t{:03}_d{:03}.png",
        synset,
        model_id,
        viewpoint.azimuth_deg.round() as i64,
        viewpoint.elevation_deg.round() as i64,
        tilt.round() as i64,
        viewpoint.distance.round() as i64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chair_viewpoints() -> Vec<Viewpoint> {
        vec![
            Viewpoint::new(0.0, 0.0, 0.0, 10.0),
            Viewpoint::new(90.0, 20.0, 10.0, 2.0),
        ]
    }

    #[test]
    fn test_image_filename_contract() {
        let vp = Viewpoint::new(45.2, 19.8, 0.0, 2.4);
        assert_eq!(
            image_filename("03001627", "abc123", &vp),
            "03001627_abc123_a045_e020_t000_d002.png"
        );
    }

    #[test]
    fn test_image_filename_tilt_negated_mod_360() {
        let vp = Viewpoint::new(0.0, 0.0, 10.0, 3.0);
        assert_eq!(
            image_filename("s", "m", &vp),
            "s_m_a000_e000_t350_d003.png"
        );

        let vp = Viewpoint::new(0.0, 0.0, -10.0, 3.0);
        assert_eq!(image_filename("s", "m", &vp), "s_m_a000_e000_t010_d003.png");
    }

    #[test]
    fn test_image_filename_negative_elevation() {
        let vp = Viewpoint::new(0.0, -30.0, 0.0, 3.0);
        assert_eq!(image_filename("s", "m", &vp), "s_m_a000_e-30_t000_d003.png");
    }

    #[test]
    fn test_job_from_request_fixed_lighting() {
        let request = RenderRequest::new(
            "models/chair.obj",
            "03001627",
            "abc123",
            chair_viewpoints(),
            "out",
        );
        let job = RenderJob::from_request(&request, &LightingConfig::default()).unwrap();

        assert_eq!(job.views.len(), 2);
        assert!(job.transparent_film);
        assert_eq!(job.vertex_color, DEFAULT_VERTEX_COLOR);
        // Every view carries the same fixed lighting.
        assert_eq!(job.views[0].environment_energy, 1.0);
        assert_eq!(job.views[0].lights, job.views[1].lights);
        // Pose of the first view: azimuth 0, elevation 0 at distance 10.
        let [x, y, z] = job.views[0].location;
        assert!((x - 10.0).abs() < 1e-9 && y.abs() < 1e-9 && z.abs() < 1e-9);
        // Unit rotation.
        let [w, qx, qy, qz] = job.views[0].rotation_wxyz;
        assert!(((w * w + qx * qx + qy * qy + qz * qz).sqrt() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_job_from_request_seeded_lighting_is_reproducible() {
        let request = RenderRequest::new("m.obj", "s", "m", chair_viewpoints(), "out").seed(77);
        let a = RenderJob::from_request(&request, &LightingConfig::default()).unwrap();
        let b = RenderJob::from_request(&request, &LightingConfig::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_job_rejects_zero_distance_viewpoint() {
        // A hand-built viewpoint can bypass the parser's distance check.
        let request = RenderRequest::new(
            "m.obj",
            "s",
            "m",
            vec![Viewpoint::new(0.0, 0.0, 0.0, 0.0)],
            "out",
        );
        assert!(RenderJob::from_request(&request, &LightingConfig::default()).is_err());
    }

    #[test]
    fn test_job_json_round_trip() {
        let request = RenderRequest::new("m.obj", "s", "m", chair_viewpoints(), "out").seed(5);
        let job = RenderJob::from_request(&request, &LightingConfig::default()).unwrap();
        let back = RenderJob::from_json(&job.to_json().unwrap()).unwrap();
        assert_eq!(job, back);
    }
}
