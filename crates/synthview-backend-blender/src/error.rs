//! Error types for the Blender backend.

use std::path::PathBuf;

use synthview_pose::{PoseError, ViewParamsError};
use thiserror::Error;

/// Result type for Blender backend operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering model views through Blender.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Blender executable not found.
    #[error("Blender executable not found. Ensure Blender is installed and in PATH, or set BLENDER_PATH environment variable")]
    BlenderNotFound,

    /// Failed to spawn the Blender process.
    #[error("Failed to spawn Blender process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    /// The Blender process timed out.
    #[error("Blender process timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// The Blender process exited with non-zero status.
    #[error("Blender process exited with status {exit_code}: {stderr}")]
    ProcessFailed { exit_code: i32, stderr: String },

    /// Failed to serialize the render job to JSON.
    #[error("Failed to serialize render job: {0}")]
    SerializeJobFailed(#[source] serde_json::Error),

    /// Failed to write the job file for Blender.
    #[error("Failed to write job file: {0}")]
    WriteJobFailed(#[source] std::io::Error),

    /// Failed to read the report written by the entrypoint.
    #[error("Failed to read Blender report from {path}: {source}")]
    ReadReportFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the report JSON.
    #[error("Failed to parse Blender report: {0}")]
    ParseReportFailed(#[source] serde_json::Error),

    /// The entrypoint reported a failure.
    #[error("Blender render failed: {message}")]
    RenderFailed { message: String },

    /// An expected rendered image is missing after a successful run.
    #[error("Expected rendered image not found: {path}")]
    OutputNotFound { path: PathBuf },

    /// Python entrypoint script not found.
    #[error("Python entrypoint script not found at: {path}")]
    EntrypointNotFound { path: PathBuf },

    /// A viewpoint could not be converted to a camera pose.
    #[error("Invalid viewpoint: {0}")]
    Pose(#[from] PoseError),

    /// The view-parameter input was malformed.
    #[error("Invalid view parameters: {0}")]
    ViewParams(#[from] ViewParamsError),

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Creates a new process failed error.
    pub fn process_failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::ProcessFailed {
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Creates a new render failed error.
    pub fn render_failed(message: impl Into<String>) -> Self {
        Self::RenderFailed {
            message: message.into(),
        }
    }

    /// Returns the stable error code for this variant.
    pub fn code(&self) -> &'static str {
        match self {
            RenderError::BlenderNotFound => "RENDER_001",
            RenderError::SpawnFailed(_) => "RENDER_002",
            RenderError::Timeout { .. } => "RENDER_003",
            RenderError::ProcessFailed { .. } => "RENDER_004",
            RenderError::SerializeJobFailed(_) => "RENDER_005",
            RenderError::WriteJobFailed(_) => "RENDER_006",
            RenderError::ReadReportFailed { .. } => "RENDER_007",
            RenderError::ParseReportFailed(_) => "RENDER_008",
            RenderError::RenderFailed { .. } => "RENDER_009",
            RenderError::OutputNotFound { .. } => "RENDER_010",
            RenderError::EntrypointNotFound { .. } => "RENDER_011",
            RenderError::Pose(_) => "RENDER_012",
            RenderError::ViewParams(_) => "RENDER_013",
            RenderError::Io(_) => "RENDER_014",
        }
    }

    /// Returns the backend category for error reporting.
    pub fn category(&self) -> &'static str {
        "blender"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RenderError::BlenderNotFound;
        assert!(err.to_string().contains("Blender executable not found"));

        let err = RenderError::Timeout { timeout_secs: 300 };
        assert!(err.to_string().contains("300 seconds"));

        let err = RenderError::process_failed(1, "something went wrong");
        assert!(err.to_string().contains("something went wrong"));
    }

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(RenderError::BlenderNotFound.code(), "RENDER_001");
        assert_eq!(RenderError::render_failed("x").code(), "RENDER_009");
        assert_eq!(RenderError::BlenderNotFound.category(), "blender");
    }

    #[test]
    fn test_pose_error_converts() {
        let err: RenderError = PoseError::ZeroNormPosition { norm: 0.0 }.into();
        assert_eq!(err.code(), "RENDER_012");
    }
}
