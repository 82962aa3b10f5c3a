//! CLI argument definitions for the synthview command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};

/// Synthview - Synthetic Model-View Rendering
#[derive(Parser)]
#[command(name = "synthview")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Render a shape model from the viewpoints in a parameter file
    Render {
        /// Path to the .obj shape model
        #[arg(short, long)]
        model: String,

        /// Category synset string, e.g. 03001627 (chairs)
        #[arg(long)]
        synset: String,

        /// Model identifier (the model md5 in the legacy dataset layout)
        #[arg(long)]
        model_id: String,

        /// View-parameter file: one `azimuth elevation tilt distance` line per image
        #[arg(short, long)]
        views: String,

        /// Output directory for the rendered images
        #[arg(short, long)]
        out: String,

        /// Seed for randomized lighting (fixed lighting when omitted)
        #[arg(long)]
        seed: Option<u32>,

        /// Path to a lighting-config JSON (built-in defaults when omitted)
        #[arg(long)]
        lighting: Option<String>,

        /// Path to the Blender executable
        #[arg(long)]
        blender_path: Option<String>,

        /// Timeout for the Blender process, seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Output machine-readable JSON instead of colored text
        #[arg(long)]
        json: bool,
    },

    /// Render evenly spaced azimuths around a model and resize the results
    Orbit {
        /// Path to the .obj shape model
        #[arg(short, long)]
        model: String,

        /// Output directory for the rendered images
        #[arg(short, long)]
        out: String,

        /// Number of images around the orbit
        #[arg(short = 'n', long, default_value_t = 1)]
        num_images: u32,

        /// Elevation angle, degrees
        #[arg(long, default_value_t = 10.0)]
        elevation: f64,

        /// In-plane tilt, degrees
        #[arg(long, default_value_t = 0.0)]
        tilt: f64,

        /// Camera distance
        #[arg(long, default_value_t = 2.0)]
        distance: f64,

        /// Width the rendered images are resized to
        #[arg(long, default_value_t = 960)]
        width: u32,

        /// Height the rendered images are resized to
        #[arg(long, default_value_t = 540)]
        height: u32,

        /// Image-name prefix
        #[arg(long, default_value = "demo")]
        prefix: String,

        /// Seed for randomized lighting (fixed lighting when omitted)
        #[arg(long)]
        seed: Option<u32>,

        /// Path to the Blender executable
        #[arg(long)]
        blender_path: Option<String>,
    },

    /// Print the camera pose for one viewpoint without rendering
    Pose {
        /// Azimuth angle, degrees
        #[arg(short, long)]
        azimuth: f64,

        /// Elevation angle, degrees
        #[arg(short, long)]
        elevation: f64,

        /// In-plane tilt, degrees
        #[arg(short, long, default_value_t = 0.0)]
        tilt: f64,

        /// Camera distance
        #[arg(short, long)]
        distance: f64,

        /// Output machine-readable JSON instead of colored text
        #[arg(long)]
        json: bool,
    },

    /// Check system dependencies and configuration
    Doctor,
}
