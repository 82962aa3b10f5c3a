//! Camera placement and orientation math.
//!
//! Maps an object-centered spherical viewpoint to the Cartesian location and
//! unit rotation quaternion that a Blender camera object consumes. All
//! functions here are pure: same input, same output, no I/O.
//!
//! The orientation convention is Blender's: a camera with identity rotation
//! looks down its local -Z axis with +Y up, and `rotation_quaternion` is a
//! `(w, x, y, z)` Hamilton quaternion applied to the object's local frame.

use glam::{DQuat, DVec3};

use crate::error::{PoseError, PoseResult};
use crate::viewpoint::Viewpoint;

/// Norm below which a position is treated as the origin.
const MIN_NORM: f64 = 1e-12;

/// Horizontal-projection norm below which the yaw decomposition is
/// degenerate (camera straight overhead or underfoot).
const MIN_HORIZONTAL: f64 = 1e-12;

/// Maps the yaw/roll reference frame onto Blender's camera frame.
///
/// The yaw/roll decomposition below assumes a camera that looks along -Y
/// with +Z up when yaw and roll are both zero; Blender's camera looks along
/// local -Z with +Y up. This constant is the rotation between the two frames
/// and is applied innermost (right operand of the Hamilton product).
const FRAME_CORRECTION: DQuat = DQuat::from_xyzw(
    0.0,
    std::f64::consts::FRAC_1_SQRT_2,
    std::f64::consts::FRAC_1_SQRT_2,
    0.0,
);

/// A camera location/orientation pair ready for assignment to a renderer
/// camera object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Object-centered world-space camera location.
    pub location: DVec3,
    /// Unit rotation quaternion orienting the camera at the origin.
    pub rotation: DQuat,
}

/// Converts object-centered spherical parameters to a Cartesian position.
///
/// Angles are in degrees and may be any real value. Well-defined for all
/// finite inputs; a zero `distance` yields the origin, which the orientation
/// functions reject.
pub fn camera_position(distance: f64, azimuth_deg: f64, elevation_deg: f64) -> DVec3 {
    let theta = azimuth_deg.to_radians();
    let phi = elevation_deg.to_radians();
    DVec3::new(
        distance * theta.cos() * phi.cos(),
        distance * theta.sin() * phi.cos(),
        distance * phi.sin(),
    )
}

/// Returns the unit quaternion orienting a camera at `position` to look at
/// the origin.
///
/// The view direction is decomposed into a yaw about the vertical axis and a
/// roll equal to the elevation angle, computed with inverse trigonometry on
/// the normalized components; every `acos` argument is clamped to `[-1, 1]`
/// to absorb floating-point overshoot.
///
/// When the position is (nearly) straight overhead or underfoot the
/// horizontal projection vanishes and yaw is undefined; the fallback fixes
/// the horizontal reference at `(0, 1)`, i.e. yaw 0, which still yields the
/// correct downward/upward view direction.
///
/// # Errors
///
/// [`PoseError::ZeroNormPosition`] if `position` has (near-)zero norm.
pub fn look_at_quaternion(position: DVec3) -> PoseResult<DQuat> {
    let dir = unit_direction(position)?;

    let horizontal = dir.x.hypot(dir.y);
    let (tx, ty) = if horizontal < MIN_HORIZONTAL {
        (0.0, 1.0)
    } else {
        (dir.x / horizontal, dir.y / horizontal)
    };

    let mut yaw = ty.clamp(-1.0, 1.0).acos();
    if tx > 0.0 {
        yaw = std::f64::consts::TAU - yaw;
    }

    let mut roll = (tx * dir.x + ty * dir.y).clamp(-1.0, 1.0).acos();
    if dir.z < 0.0 {
        roll = -roll;
    }

    Ok(yaw_pitch_roll_quaternion(yaw, 0.0, roll) * FRAME_CORRECTION)
}

/// Returns the unit quaternion for an in-plane rotation of `theta_deg`
/// about the viewing axis of a camera at `position`.
///
/// The rotation axis is the camera-to-origin direction; the quaternion is
/// `(cos(theta/2), -axis * sin(theta/2))`.
///
/// # Errors
///
/// [`PoseError::ZeroNormPosition`] if `position` has (near-)zero norm.
pub fn tilt_quaternion(position: DVec3, theta_deg: f64) -> PoseResult<DQuat> {
    let axis = -unit_direction(position)?;
    let (sin, cos) = (theta_deg.to_radians() * 0.5).sin_cos();
    let v = -axis * sin;
    Ok(DQuat::from_xyzw(v.x, v.y, v.z, cos))
}

/// Returns the final camera orientation for a camera at `position` with an
/// in-plane tilt of `tilt_deg`.
///
/// The tilt is applied in the outer frame: `q_tilt * q_look`. The product
/// order is part of the renderer contract; swapping it flips the apparent
/// roll direction in the rendered image.
///
/// # Errors
///
/// [`PoseError::ZeroNormPosition`] if `position` has (near-)zero norm.
pub fn camera_orientation(position: DVec3, tilt_deg: f64) -> PoseResult<DQuat> {
    let look = look_at_quaternion(position)?;
    let tilt = tilt_quaternion(position, tilt_deg)?;
    Ok(tilt * look)
}

impl Viewpoint {
    /// Computes the full camera pose for this viewpoint.
    ///
    /// # Errors
    ///
    /// [`PoseError::ZeroNormPosition`] if the viewpoint's distance is so
    /// small that the derived position collapses onto the origin.
    pub fn camera_pose(&self) -> PoseResult<CameraPose> {
        let location = camera_position(self.distance, self.azimuth_deg, self.elevation_deg);
        let rotation = camera_orientation(location, self.tilt_deg)?;
        Ok(CameraPose { location, rotation })
    }
}

fn unit_direction(position: DVec3) -> PoseResult<DVec3> {
    let norm = position.length();
    if norm < MIN_NORM {
        return Err(PoseError::ZeroNormPosition { norm });
    }
    Ok(position / norm)
}

/// Builds a quaternion from intrinsic yaw (Z), pitch (Y), roll (X) angles
/// in radians.
fn yaw_pitch_roll_quaternion(yaw: f64, pitch: f64, roll: f64) -> DQuat {
    DQuat::from_rotation_z(yaw) * DQuat::from_rotation_y(pitch) * DQuat::from_rotation_x(roll)
}
