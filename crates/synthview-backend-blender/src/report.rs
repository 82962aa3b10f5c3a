//! Report types written back by the Python entrypoint.

use serde::{Deserialize, Serialize};
use synthview_pose::Viewpoint;

/// The report the entrypoint writes after a render run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderReport {
    /// Whether every view rendered successfully.
    pub ok: bool,
    /// Error message when `ok` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Blender version string, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blender_version: Option<String>,
    /// Views rendered before completion or failure.
    #[serde(default)]
    pub views: Vec<RenderedView>,
}

/// One image the entrypoint reports as rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedView {
    /// Image filename relative to the job's output directory.
    pub filename: String,
    /// The viewpoint the image was rendered from.
    pub viewpoint: Viewpoint,
}

impl RenderReport {
    /// Creates a success report.
    pub fn success(views: Vec<RenderedView>) -> Self {
        Self {
            ok: true,
            error: None,
            blender_version: None,
            views,
        }
    }

    /// Creates a failure report.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(message.into()),
            blender_version: None,
            views: Vec::new(),
        }
    }

    /// Parses a report from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the report to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_report_round_trip() {
        let report = RenderReport::success(vec![RenderedView {
            filename: "s_m_a000_e000_t000_d003.png".to_string(),
            viewpoint: Viewpoint::new(0.0, 0.0, 0.0, 3.0),
        }]);
        let back = RenderReport::from_json(&report.to_json().unwrap()).unwrap();
        assert_eq!(report, back);
    }

    #[test]
    fn test_failure_report() {
        let report = RenderReport::failure("import failed");
        assert!(!report.ok);
        assert_eq!(report.error.as_deref(), Some("import failed"));
        assert!(report.views.is_empty());
    }

    #[test]
    fn test_report_parses_without_views_field() {
        let report = RenderReport::from_json(r#"{"ok": false, "error": "boom"}"#).unwrap();
        assert!(!report.ok);
        assert!(report.views.is_empty());
    }
}
