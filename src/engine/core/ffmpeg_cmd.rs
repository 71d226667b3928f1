// ffmpeg invocations for encoder probing and file conversion

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};

use super::types::ConversionJob;

/// Synthetic source for test encodes: one second of 128x128 black
pub const PROBE_SOURCE: &str = "color=black:s=128x128:d=1";

pub const AUDIO_CODEC: &str = "aac";
pub const AUDIO_BITRATE: &str = "320k";

/// Build the test-encode command used to decide whether an encoder works
pub fn build_probe_cmd(binary: &OsStr, encoder: &str, temp_output: &Path) -> Command {
    let mut cmd = Command::new(binary);
    cmd.arg("-y")
        .args(["-f", "lavfi"])
        .args(["-i", PROBE_SOURCE])
        .args(["-c:v", encoder])
        .arg(temp_output)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    hide_console_window(&mut cmd);
    cmd
}

/// Build the conversion command for one job.
///
/// Only the first video stream and any audio streams are mapped; `0:a?` keeps
/// inputs without audio from failing. All output is discarded.
pub fn build_convert_cmd(binary: &OsStr, job: &ConversionJob) -> Command {
    let mut cmd = Command::new(binary);
    cmd.arg("-y")
        .arg("-i")
        .arg(&job.input_path)
        .args(["-c:v", job.encoder.as_str()])
        .args(["-c:a", AUDIO_CODEC])
        .args(["-b:a", AUDIO_BITRATE])
        .args(["-map", "0:v:0"])
        .args(["-map", "0:a?"])
        .arg(&job.output_path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    hide_console_window(&mut cmd);
    cmd
}

/// Render a command as a single shell-like line (for dry runs and logs)
pub fn format_ffmpeg_cmd(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().to_string()];
    parts.extend(cmd.get_args().map(|a| a.to_string_lossy().to_string()));
    parts.join(" ")
}

#[cfg(windows)]
fn hide_console_window(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    cmd.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn hide_console_window(_cmd: &mut Command) {}
