// Typed failures for probing, conversion and session preconditions

use std::path::PathBuf;
use thiserror::Error;

/// Why a single encoder candidate was judged unusable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeFailure {
    #[error("failed to launch encoder binary: {0}")]
    Spawn(String),

    #[error("test encode exited with {0}")]
    ExitStatus(String),

    /// Exit status was zero but the diagnostic stream mentioned "Error"
    #[error("test encode reported an error: {0}")]
    DiagnosticError(String),
}

/// Why a single file conversion did not complete
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionFailure {
    #[error("failed to launch encoder binary: {0}")]
    Spawn(String),

    #[error("encoder exited with {0}")]
    ExitStatus(String),
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("No usable GPU encoders detected.")]
    NoUsableEncoder,
}

/// Rejections raised before a batch is allowed to start
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No folder selected. Please select a folder with video files.")]
    NoFolderSelected,

    #[error("Please select a folder with video files.")]
    NoVideoFiles,

    #[error("No encoder selected.")]
    NoEncoderSelected,

    #[error("Encoder '{0}' is not available on this system.")]
    UnknownEncoder(String),

    #[error("Failed to list {}: {source}", path.display())]
    Listing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
