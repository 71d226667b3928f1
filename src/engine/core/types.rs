use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::engine::error::{ConversionFailure, ProbeFailure};

/// Output containers offered to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Mp4,
    Mkv,
    Webm,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Mp4, OutputFormat::Mkv, OutputFormat::Webm];

    /// Extension including the leading dot, appended verbatim to output names
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp4 => ".mp4",
            Self::Mkv => ".mkv",
            Self::Webm => ".webm",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_start_matches('.').to_lowercase();
        match normalized.as_str() {
            "mp4" => Ok(Self::Mp4),
            "mkv" => Ok(Self::Mkv),
            "webm" => Ok(Self::Webm),
            _ => Err(format!(
                "unsupported output format '{}' (expected one of .mp4, .mkv, .webm)",
                s
            )),
        }
    }
}

/// A video file discovered in the selected folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoFile {
    pub path: PathBuf,
}

impl VideoFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// One input file paired with its derived output path and encoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub encoder: String,
}

impl ConversionJob {
    pub fn new(input_path: PathBuf, output_dir: &Path, encoder: &str, format: OutputFormat) -> Self {
        let output_path = derive_output_path(&input_path, output_dir, encoder, format);
        Self {
            input_path,
            output_path,
            encoder: encoder.to_string(),
        }
    }
}

/// `<output_dir>/<stem>_<encoder><ext>`, where stem drops only the last extension
pub fn derive_output_path(
    input_path: &Path,
    output_dir: &Path,
    encoder: &str,
    format: OutputFormat,
) -> PathBuf {
    let stem = input_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    output_dir.join(format!("{}_{}{}", stem, encoder, format.extension()))
}

/// Completed/total counter reported after each file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BatchProgress {
    pub completed: usize,
    pub total: usize,
}

impl BatchProgress {
    pub fn new(total: usize) -> Self {
        Self {
            completed: 0,
            total,
        }
    }

    pub fn pending(&self) -> usize {
        self.total.saturating_sub(self.completed)
    }

    /// Whole percent, rounded down
    pub fn percent(&self) -> u16 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed * 100) / self.total).min(100) as u16
    }

    pub fn is_finished(&self) -> bool {
        self.completed >= self.total
    }

    pub fn label(&self) -> String {
        format!(
            "Converted: {} / {} | Pending: {} | {}%",
            self.completed,
            self.total,
            self.pending(),
            self.percent()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    Working(String),
    Failed(ProbeFailure),
}

impl ProbeResult {
    pub fn is_working(&self) -> bool {
        matches!(self, Self::Working(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    Completed,
    Failed(ConversionFailure),
}

impl ConversionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}
