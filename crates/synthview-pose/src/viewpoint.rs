//! Viewpoint values and the view-parameter file parser.
//!
//! A view-parameter file is the fixed input contract of the rendering
//! pipeline: one line per requested image, four whitespace-separated floats
//! `azimuth_deg elevation_deg tilt_deg distance`, consumed in file order.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ViewParamsError;

/// One requested camera pose in object-centered spherical coordinates.
///
/// Angles are in degrees and may be any real value; trigonometry wraps them.
/// `distance` must be positive — the parser enforces this, and the pose
/// functions reject the degenerate zero-norm position it would produce.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewpoint {
    /// Rotation around the vertical axis, degrees.
    pub azimuth_deg: f64,
    /// Angle above the horizontal plane, degrees.
    pub elevation_deg: f64,
    /// In-plane rotation about the viewing axis, degrees.
    pub tilt_deg: f64,
    /// Distance from the object center.
    pub distance: f64,
}

impl Viewpoint {
    /// Creates a viewpoint from raw components.
    pub fn new(azimuth_deg: f64, elevation_deg: f64, tilt_deg: f64, distance: f64) -> Self {
        Self {
            azimuth_deg,
            elevation_deg,
            tilt_deg,
            distance,
        }
    }

    fn parse_fields(line: &str, line_no: usize) -> Result<Self, ViewParamsError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(ViewParamsError::FieldCount {
                line: line_no,
                found: fields.len(),
            });
        }

        let parse = |field: &'static str, value: &str| -> Result<f64, ViewParamsError> {
            value.parse().map_err(|_| ViewParamsError::InvalidFloat {
                line: line_no,
                field,
                value: value.to_string(),
            })
        };

        let viewpoint = Self {
            azimuth_deg: parse("azimuth", fields[0])?,
            elevation_deg: parse("elevation", fields[1])?,
            tilt_deg: parse("tilt", fields[2])?,
            distance: parse("distance", fields[3])?,
        };

        if viewpoint.distance <= 0.0 {
            return Err(ViewParamsError::NonPositiveDistance {
                line: line_no,
                distance: viewpoint.distance,
            });
        }

        Ok(viewpoint)
    }
}

impl FromStr for Viewpoint {
    type Err = ViewParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_fields(s, 1)
    }
}

/// Parses the contents of a view-parameter file.
///
/// Blank lines are skipped; any other malformed line aborts the parse with
/// the offending 1-based line number.
pub fn parse_view_params(contents: &str) -> Result<Vec<Viewpoint>, ViewParamsError> {
    let mut viewpoints = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        viewpoints.push(Viewpoint::parse_fields(line, index + 1)?);
    }
    Ok(viewpoints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_single_line() {
        let vp: Viewpoint = "45 20 0 2.5".parse().unwrap();
        assert_eq!(vp, Viewpoint::new(45.0, 20.0, 0.0, 2.5));
    }

    #[test]
    fn test_parse_negative_elevation_and_tilt() {
        let vp: Viewpoint = "270.5 -30 -15 8".parse().unwrap();
        assert_eq!(vp, Viewpoint::new(270.5, -30.0, -15.0, 8.0));
    }

    #[test]
    fn test_parse_file_order_preserved() {
        let contents = "0 0 0 10\n90 10 5 3\n\n180 -45 0 2\n";
        let views = parse_view_params(contents).unwrap();
        assert_eq!(views.len(), 3);
        assert_eq!(views[0].azimuth_deg, 0.0);
        assert_eq!(views[1].azimuth_deg, 90.0);
        assert_eq!(views[2].azimuth_deg, 180.0);
    }

    #[test]
    fn test_parse_extra_whitespace() {
        let views = parse_view_params("  10   20\t30   4  \n").unwrap();
        assert_eq!(views[0], Viewpoint::new(10.0, 20.0, 30.0, 4.0));
    }

    #[test]
    fn test_field_count_error_carries_line_number() {
        let err = parse_view_params("0 0 0 10\n1 2 3\n").unwrap_err();
        assert_eq!(err, ViewParamsError::FieldCount { line: 2, found: 3 });
    }

    #[test]
    fn test_invalid_float_error() {
        let err = parse_view_params("0 zero 0 10\n").unwrap_err();
        match err {
            ViewParamsError::InvalidFloat { line, field, value } => {
                assert_eq!(line, 1);
                assert_eq!(field, "elevation");
                assert_eq!(value, "zero");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_positive_distance_rejected() {
        let err = parse_view_params("0 0 0 0\n").unwrap_err();
        assert_eq!(
            err,
            ViewParamsError::NonPositiveDistance {
                line: 1,
                distance: 0.0
            }
        );
        assert!("0 0 0 -3".parse::<Viewpoint>().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let vp = Viewpoint::new(12.5, -8.0, 90.0, 3.0);
        let json = serde_json::to_string(&vp).unwrap();
        let back: Viewpoint = serde_json::from_str(&json).unwrap();
        assert_eq!(vp, back);
    }
}
