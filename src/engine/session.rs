// Explicit selection context: folder, file snapshot, encoder and output format

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::core::{ConversionJob, OutputFormat, VideoFile, list_video_files};
use super::error::SessionError;
use super::probe::EncoderAvailability;

/// Name of the folder created under the input folder for results
pub const OUTPUT_SUBDIR: &str = "converted";

/// Everything the worker needs to run a batch
#[derive(Debug, Clone)]
pub struct BatchPlan {
    pub output_dir: PathBuf,
    pub encoder: String,
    pub output_format: OutputFormat,
    pub jobs: Vec<ConversionJob>,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    folder: Option<PathBuf>,
    files: Vec<VideoFile>,
    encoder: Option<String>,
    output_format: OutputFormat,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    pub fn files(&self) -> &[VideoFile] {
        &self.files
    }

    pub fn encoder(&self) -> Option<&str> {
        self.encoder.as_deref()
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    /// Select the input folder and snapshot its video files.
    ///
    /// Returns the number of files found. On a listing error the previous
    /// selection is left untouched.
    pub fn select_folder(&mut self, folder: impl Into<PathBuf>) -> Result<usize, SessionError> {
        let folder = folder.into();
        let files = list_video_files(&folder).map_err(|source| SessionError::Listing {
            path: folder.clone(),
            source,
        })?;

        info!(folder = %folder.display(), count = files.len(), "video files found");

        let count = files.len();
        self.folder = Some(folder);
        self.files = files;
        Ok(count)
    }

    /// Choose an encoder; only encoders that probed successfully are accepted
    pub fn select_encoder(
        &mut self,
        availability: &EncoderAvailability,
        encoder: &str,
    ) -> Result<(), SessionError> {
        if !availability.contains(encoder) {
            return Err(SessionError::UnknownEncoder(encoder.to_string()));
        }
        self.encoder = Some(encoder.to_string());
        Ok(())
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    /// `<folder>/converted`, once a folder is selected
    pub fn output_dir(&self) -> Option<PathBuf> {
        self.folder.as_ref().map(|f| f.join(OUTPUT_SUBDIR))
    }

    /// Validate the selection and build the jobs without touching the disk
    pub fn preview(&self) -> Result<BatchPlan, SessionError> {
        let folder = self.folder.as_ref().ok_or(SessionError::NoFolderSelected)?;
        if self.files.is_empty() {
            return Err(SessionError::NoVideoFiles);
        }
        let encoder = self.encoder.as_ref().ok_or(SessionError::NoEncoderSelected)?;

        let output_dir = folder.join(OUTPUT_SUBDIR);
        let jobs = self
            .files
            .iter()
            .map(|f| ConversionJob::new(f.path.clone(), &output_dir, encoder, self.output_format))
            .collect();

        Ok(BatchPlan {
            output_dir,
            encoder: encoder.clone(),
            output_format: self.output_format,
            jobs,
        })
    }

    /// Validate the selection and prepare the output folder.
    ///
    /// Rejections leave the session unchanged and create nothing on disk.
    pub fn plan(&self) -> Result<BatchPlan, SessionError> {
        let plan = self.preview()?;
        fs::create_dir_all(&plan.output_dir).map_err(|source| SessionError::OutputDir {
            path: plan.output_dir.clone(),
            source,
        })?;
        Ok(plan)
    }
}
