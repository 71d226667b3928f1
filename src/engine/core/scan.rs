use super::types::VideoFile;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Video file extensions recognised in the input folder
pub const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".mov", ".mkv", ".avi", ".webm"];

/// Check if a path's file name ends with a video extension (case-insensitive)
pub fn is_video_file(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    // Only the suffix has to be readable; the rest of the name may be any bytes
    let name = name.to_string_lossy().to_lowercase();
    VIDEO_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// List the video files directly inside `folder`, in filesystem enumeration order.
///
/// Subdirectories are not descended into, so the `converted` output folder of a
/// previous run never feeds back into the list.
pub fn list_video_files(folder: &Path) -> io::Result<Vec<VideoFile>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry = entry.map_err(io::Error::from)?;
        let path = entry.path();
        if path.is_file() && is_video_file(path) {
            files.push(VideoFile::new(path));
        }
    }

    Ok(files)
}
