//! Path helpers for naming suggested output files

use std::path::{Path, PathBuf};

/// Extensions treated as video inputs when a directory is expanded
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "m4v", "mov", "mkv", "webm", "avi", "ts", "mts", "m2ts", "flv", "wmv", "mpg", "mpeg",
    "mxf", "3gp", "ogv",
];

/// Path utilities
pub struct PathUtils;

impl PathUtils {
    /// Get lower-cased file extension from path
    pub fn get_extension(path: &Path) -> Option<String> {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }

    /// File extension exactly as written, for naming derived files
    pub fn original_extension(path: &Path) -> Option<String> {
        path.extension().map(|ext| ext.to_string_lossy().to_string())
    }

    /// Get file stem (name without extension) from path
    pub fn get_stem(path: &Path) -> String {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "output".to_string())
    }

    /// Display name used for a probed file
    pub fn display_name(path: &Path) -> String {
        path.file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string())
    }

    /// Check whether a path looks like a video file by extension
    pub fn is_video_file(path: &Path) -> bool {
        Self::get_extension(path)
            .map(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    /// Build `<dir>/<stem><suffix>.<ext>`
    ///
    /// `dir` defaults to the directory of `source`.
    pub fn sibling_with_suffix(
        source: &Path,
        dir: Option<&Path>,
        stem: &str,
        suffix: &str,
        extension: &str,
    ) -> PathBuf {
        let dir = dir
            .map(Path::to_path_buf)
            .or_else(|| source.parent().map(Path::to_path_buf))
            .unwrap_or_default();

        let file_name = if extension.is_empty() {
            format!("{}{}", stem, suffix)
        } else {
            format!("{}{}.{}", stem, suffix, extension)
        };

        dir.join(file_name)
    }
}
