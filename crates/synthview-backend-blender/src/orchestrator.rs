//! Blender subprocess orchestrator.
//!
//! This module handles spawning Blender as a subprocess and managing
//! communication via job/report JSON files.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use crate::error::{RenderError, RenderResult};
use crate::job::RenderJob;
use crate::report::RenderReport;

const EMBEDDED_ENTRYPOINT_PY: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../blender/entrypoint.py"
));

/// Default timeout for Blender execution (5 minutes).
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Configuration for the Blender orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Path to the Blender executable.
    pub blender_path: Option<PathBuf>,
    /// Path to the Python entrypoint script.
    pub entrypoint_path: PathBuf,
    /// Timeout for Blender execution.
    pub timeout: Duration,
    /// Whether to capture Blender's stderr.
    pub capture_output: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            blender_path: None,
            entrypoint_path: PathBuf::from("blender/entrypoint.py"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            capture_output: true,
        }
    }
}

impl OrchestratorConfig {
    /// Creates a new config with the given entrypoint path.
    pub fn with_entrypoint(entrypoint_path: impl Into<PathBuf>) -> Self {
        Self {
            entrypoint_path: entrypoint_path.into(),
            ..Default::default()
        }
    }

    /// Sets the Blender executable path.
    pub fn blender_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.blender_path = Some(path.into());
        self
    }

    /// Sets the timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}

/// The Blender subprocess orchestrator.
pub struct Orchestrator {
    config: OrchestratorConfig,
}

struct ResolvedEntrypoint {
    path: PathBuf,
    _tempfile: Option<tempfile::NamedTempFile>,
}

impl Orchestrator {
    /// Creates a new orchestrator with default configuration.
    pub fn new() -> Self {
        Self {
            config: OrchestratorConfig::default(),
        }
    }

    /// Creates a new orchestrator with the given configuration.
    pub fn with_config(config: OrchestratorConfig) -> Self {
        Self { config }
    }

    /// Finds the Blender executable path.
    pub fn find_blender(&self) -> RenderResult<PathBuf> {
        // Check config override first
        if let Some(ref path) = self.config.blender_path {
            if path.exists() {
                return Ok(path.clone());
            }
        }

        // Check BLENDER_PATH environment variable
        if let Ok(path) = std::env::var("BLENDER_PATH") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(path);
            }
        }

        // Try to find Blender in PATH
        let blender_names = if cfg!(windows) {
            vec!["blender.exe", "blender"]
        } else {
            vec!["blender"]
        };

        for name in blender_names {
            if let Ok(path) = which::which(name) {
                return Ok(path);
            }
        }

        // Try common installation paths
        let common_paths = if cfg!(windows) {
            vec![
                "C:\\Program Files\\Blender Foundation\\Blender 4.0\\blender.exe",
                "C:\\Program Files\\Blender Foundation\\Blender 3.6\\blender.exe",
                "C:\\Program Files\\Blender Foundation\\Blender\\blender.exe",
            ]
        } else if cfg!(target_os = "macos") {
            vec![
                "/Applications/Blender.app/Contents/MacOS/Blender",
                "/Applications/Blender.app/Contents/MacOS/blender",
            ]
        } else {
            vec![
                "/usr/bin/blender",
                "/usr/local/bin/blender",
                "/snap/bin/blender",
            ]
        };

        for path_str in common_paths {
            let path = PathBuf::from(path_str);
            if path.exists() {
                return Ok(path);
            }
        }

        Err(RenderError::BlenderNotFound)
    }

    fn resolve_entrypoint(&self) -> RenderResult<ResolvedEntrypoint> {
        // Config override first.
        if self.config.entrypoint_path.exists() {
            return Ok(ResolvedEntrypoint {
                path: self.config.entrypoint_path.clone(),
                _tempfile: None,
            });
        }

        // Environment override (fallback).
        if let Ok(path) = std::env::var("SYNTHVIEW_BLENDER_ENTRYPOINT") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(ResolvedEntrypoint {
                    path,
                    _tempfile: None,
                });
            }
            return Err(RenderError::EntrypointNotFound { path });
        }

        // Last resort: write embedded entrypoint to a temp file.
        let mut file = tempfile::Builder::new()
            .prefix("synthview_blender_entrypoint_")
            .suffix(".py")
            .tempfile()
            .map_err(RenderError::Io)?;
        file.write_all(EMBEDDED_ENTRYPOINT_PY.as_bytes())
            .map_err(RenderError::Io)?;
        file.flush().map_err(RenderError::Io)?;

        Ok(ResolvedEntrypoint {
            path: file.path().to_path_buf(),
            _tempfile: Some(file),
        })
    }

    /// Runs Blender on a job file.
    ///
    /// # Arguments
    ///
    /// * `job_path` - Path to the job JSON file
    /// * `report_path` - Path where the entrypoint writes its report JSON
    pub fn run(&self, job_path: &Path, report_path: &Path) -> RenderResult<RenderReport> {
        let blender_path = self.find_blender()?;

        let entrypoint = self.resolve_entrypoint()?;

        // Build the command
        // blender --background --factory-startup --python entrypoint.py -- --job <path> --report <path>
        let mut cmd = Command::new(&blender_path);
        cmd.arg("--background")
            .arg("--factory-startup")
            .arg("--python")
            .arg(&entrypoint.path)
            .arg("--")
            .arg("--job")
            .arg(job_path)
            .arg("--report")
            .arg(report_path);

        if self.config.capture_output {
            // Only stderr is surfaced today; keep stdout unpiped to reduce the risk of
            // subprocess deadlocks caused by a filled stdout pipe.
            cmd.stdout(Stdio::null()).stderr(Stdio::piped());
        }

        // Spawn the process
        let child = cmd.spawn().map_err(RenderError::SpawnFailed)?;

        let (status, stderr) =
            wait_with_timeout(child, self.config.timeout, self.config.capture_output)?;

        // Check exit status
        if !status.success() {
            let exit_code = status.code().unwrap_or(-1);
            return Err(RenderError::process_failed(exit_code, stderr));
        }

        // Read and parse the report
        let report_content =
            std::fs::read_to_string(report_path).map_err(|e| RenderError::ReadReportFailed {
                path: report_path.to_path_buf(),
                source: e,
            })?;

        let report = RenderReport::from_json(&report_content).map_err(RenderError::ParseReportFailed)?;

        // Check if the entrypoint reported an error
        if !report.ok {
            return Err(RenderError::render_failed(
                report.error.clone().unwrap_or_else(|| "Unknown error".to_string()),
            ));
        }

        Ok(report)
    }

    /// Runs Blender on an in-memory job.
    ///
    /// This creates temporary files for the job and report, then invokes Blender.
    pub fn run_with_job(&self, job: &RenderJob) -> RenderResult<RenderReport> {
        // Create temp directory for job and report
        let temp_dir = tempfile::tempdir().map_err(RenderError::Io)?;
        let job_path = temp_dir.path().join("job.json");
        let report_path = temp_dir.path().join("report.json");

        // Write job to temp file
        let job_json = job.to_json().map_err(RenderError::SerializeJobFailed)?;
        std::fs::write(&job_path, job_json).map_err(RenderError::WriteJobFailed)?;

        // Run Blender
        self.run(&job_path, &report_path)
    }
}

fn wait_with_timeout(
    mut child: Child,
    timeout: Duration,
    capture_output: bool,
) -> RenderResult<(ExitStatus, String)> {
    let start = Instant::now();

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(RenderError::Timeout {
                        timeout_secs: timeout.as_secs(),
                    });
                }
                std::thread::sleep(Duration::from_millis(100));
            }
            Err(e) => return Err(RenderError::SpawnFailed(e)),
        }
    };

    let stderr = if capture_output {
        let mut buf = String::new();
        if let Some(mut err) = child.stderr.take() {
            let _ = err.read_to_string(&mut buf);
        }
        buf
    } else {
        String::new()
    };

    Ok((status, stderr))
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = OrchestratorConfig::with_entrypoint("custom/path.py")
            .blender_path("/usr/bin/blender")
            .timeout_secs(600);

        assert_eq!(config.entrypoint_path, PathBuf::from("custom/path.py"));
        assert_eq!(config.blender_path, Some(PathBuf::from("/usr/bin/blender")));
        assert_eq!(config.timeout, Duration::from_secs(600));
    }

    #[test]
    fn test_wait_with_timeout_captures_stderr() {
        let mut cmd = if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "echo hello 1>&2"]);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", "echo hello 1>&2"]);
            cmd
        };

        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        let child = cmd.spawn().unwrap();

        let (status, stderr) = wait_with_timeout(child, Duration::from_secs(2), true).unwrap();
        assert!(status.success());
        assert!(stderr.to_lowercase().contains("hello"));
    }

    #[test]
    fn test_resolve_entrypoint_falls_back_to_embedded() {
        // If the user has configured an environment override, don't stomp it.
        if std::env::var_os("SYNTHVIEW_BLENDER_ENTRYPOINT").is_some() {
            eprintln!("SYNTHVIEW_BLENDER_ENTRYPOINT is set; skipping embedded entrypoint test");
            return;
        }

        let config = OrchestratorConfig::with_entrypoint("this/does/not/exist.py");
        let orchestrator = Orchestrator::with_config(config);

        let entrypoint = orchestrator.resolve_entrypoint().unwrap();
        assert!(entrypoint.path.exists());

        let content = std::fs::read_to_string(&entrypoint.path).unwrap();
        assert!(content.contains("Synthview Blender Entrypoint"));
    }

    #[test]
    fn test_run_surfaces_entrypoint_failure() {
        // A report with ok=false must become a RenderFailed error even when
        // the process itself exits cleanly; exercised here through the
        // report-parsing path alone.
        let report = RenderReport::failure("model import failed");
        assert!(!report.ok);
        let err = RenderError::render_failed(report.error.unwrap());
        assert!(err.to_string().contains("model import failed"));
    }
}
