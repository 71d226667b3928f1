mod ffmpeg_cmd;
mod ffmpeg_info;
mod scan;
mod transcoder;
mod types;

pub use ffmpeg_cmd::{
    AUDIO_BITRATE, AUDIO_CODEC, PROBE_SOURCE, build_convert_cmd, build_probe_cmd,
    format_ffmpeg_cmd,
};
pub use ffmpeg_info::{ffmpeg_version, resolve_ffmpeg_binary};
pub use scan::{VIDEO_EXTENSIONS, is_video_file, list_video_files};
pub use transcoder::{Ffmpeg, PROBE_ERROR_MARKER, Transcoder, classify_probe};
pub use types::{
    BatchProgress, ConversionJob, ConversionOutcome, OutputFormat, ProbeResult, VideoFile,
    derive_output_path,
};
