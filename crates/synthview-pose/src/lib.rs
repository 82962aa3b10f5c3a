//! Synthview Pose Library
//!
//! This crate provides the viewpoint-to-camera-pose conversion used by the
//! synthview rendering pipeline. Given an object-centered spherical
//! viewpoint (azimuth, elevation, in-plane tilt, distance), it computes the
//! Cartesian camera location and the unit rotation quaternion to assign to
//! Blender's `rotation_quaternion` camera property.
//!
//! Everything here is pure arithmetic: no I/O, no process state, safe to
//! call repeatedly and in parallel. The host-application interaction lives
//! in `synthview-backend-blender`.
//!
//! # Example
//!
//! ```
//! use synthview_pose::parse_view_params;
//!
//! // One line per view: azimuth elevation tilt distance
//! let views = parse_view_params("45 20 0 2.5\n135 20 0 2.5\n").unwrap();
//! assert_eq!(views.len(), 2);
//!
//! let pose = views[0].camera_pose().unwrap();
//! assert!((pose.location.length() - 2.5).abs() < 1e-9);
//! assert!((pose.rotation.length() - 1.0).abs() < 1e-9);
//! ```
//!
//! # Modules
//!
//! - [`camera`]: position and quaternion math
//! - [`viewpoint`]: viewpoint values and the parameter-file parser
//! - [`error`]: typed errors for pose math and parsing

pub mod camera;
pub mod error;
pub mod viewpoint;

// Re-export commonly used items at the crate root
pub use camera::{
    camera_orientation, camera_position, look_at_quaternion, tilt_quaternion, CameraPose,
};
pub use error::{PoseError, PoseResult, ViewParamsError};
pub use viewpoint::{parse_view_params, Viewpoint};

// The math types are part of the public API surface.
pub use glam::{DQuat, DVec3};
