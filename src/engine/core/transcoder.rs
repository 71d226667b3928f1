// The external encoder, seen as a black box that can test an encoder or convert a file

use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::ffmpeg_cmd::{build_convert_cmd, build_probe_cmd};
use super::types::{ConversionJob, ConversionOutcome, ProbeResult};
use crate::engine::error::{ConversionFailure, ProbeFailure};

/// Operations the prober and batch converter need from the encoder binary
pub trait Transcoder: Send + Sync {
    /// Test-encode a synthetic clip with `encoder`
    fn probe_encoder(&self, encoder: &str) -> ProbeResult;

    /// Convert one file; blocks until the encoder exits
    fn convert(&self, job: &ConversionJob) -> ConversionOutcome;
}

/// Marker the probe looks for in ffmpeg's diagnostic stream (case-sensitive)
pub const PROBE_ERROR_MARKER: &str = "Error";

/// Classify a finished test encode.
///
/// Working only when the exit status is zero AND stderr never mentions "Error".
/// This is a text heuristic, so a clean run that happens to print the word is
/// rejected too.
pub fn classify_probe(encoder: &str, success: bool, status: &str, stderr: &str) -> ProbeResult {
    if !success {
        return ProbeResult::Failed(ProbeFailure::ExitStatus(status.to_string()));
    }

    match stderr.lines().find(|l| l.contains(PROBE_ERROR_MARKER)) {
        Some(line) => ProbeResult::Failed(ProbeFailure::DiagnosticError(line.trim().to_string())),
        None => ProbeResult::Working(encoder.to_string()),
    }
}

/// ffmpeg driven through `std::process::Command`
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    binary: PathBuf,
}

impl Ffmpeg {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn probe_output_path() -> PathBuf {
        std::env::temp_dir().join(format!("gpuconv_probe_{}.mp4", Uuid::new_v4()))
    }
}

impl Transcoder for Ffmpeg {
    fn probe_encoder(&self, encoder: &str) -> ProbeResult {
        let temp_output = Self::probe_output_path();
        let output = build_probe_cmd(self.binary.as_os_str(), encoder, &temp_output).output();

        // Best-effort; a leftover temp file never changes the verdict
        let _ = fs::remove_file(&temp_output);

        match output {
            Ok(out) => {
                let stderr = String::from_utf8_lossy(&out.stderr);
                classify_probe(encoder, out.status.success(), &out.status.to_string(), &stderr)
            }
            Err(e) => ProbeResult::Failed(ProbeFailure::Spawn(e.to_string())),
        }
    }

    fn convert(&self, job: &ConversionJob) -> ConversionOutcome {
        match build_convert_cmd(self.binary.as_os_str(), job).status() {
            Ok(status) if status.success() => ConversionOutcome::Completed,
            Ok(status) => {
                ConversionOutcome::Failed(ConversionFailure::ExitStatus(status.to_string()))
            }
            Err(e) => ConversionOutcome::Failed(ConversionFailure::Spawn(e.to_string())),
        }
    }
}
