use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

#[cfg(windows)]
const BUNDLED_FFMPEG: &str = "extra/bin/ffmpeg.exe";
#[cfg(not(windows))]
const BUNDLED_FFMPEG: &str = "extra/bin/ffmpeg";

/// Pick the ffmpeg binary to drive.
///
/// Order: explicit override (CLI flag, then config), a copy bundled next to the
/// executable under `extra/bin/`, then plain `ffmpeg` resolved through `PATH`.
pub fn resolve_ffmpeg_binary(cli_override: Option<&Path>, config_path: Option<&Path>) -> PathBuf {
    if let Some(path) = cli_override.or(config_path) {
        return path.to_path_buf();
    }

    let bundled = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(BUNDLED_FFMPEG)));

    match bundled {
        Some(path) if path.is_file() => path,
        _ => PathBuf::from("ffmpeg"),
    }
}

/// Check if ffmpeg is runnable and return the first line of its version banner
pub fn ffmpeg_version(binary: &Path) -> Result<String> {
    let output = Command::new(binary)
        .arg("-version")
        .output()
        .with_context(|| {
            format!(
                "Failed to execute {}. Is ffmpeg installed and in PATH?",
                binary.display()
            )
        })?;

    if !output.status.success() {
        anyhow::bail!("ffmpeg command failed with status: {}", output.status);
    }

    let version_output = String::from_utf8_lossy(&output.stdout);
    let first_line = version_output.lines().next().unwrap_or("Unknown version");

    Ok(first_line.to_string())
}
