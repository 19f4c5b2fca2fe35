//! FFmpeg still-frame adapter

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::adapters::process::run_tool;
use crate::domain::errors::ExtractionError;
use crate::ports::ThumbnailPort;

/// Default thumbnail timeout
pub const DEFAULT_THUMBNAIL_TIMEOUT: Duration = Duration::from_secs(10);

/// Width of generated thumbnails in pixels
const THUMBNAIL_WIDTH: u32 = 320;

/// Grabs one JPEG frame through ffmpeg's image2pipe muxer
pub struct FfmpegThumbnailAdapter {
    program: PathBuf,
    timeout: Duration,
}

impl FfmpegThumbnailAdapter {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Arguments for a frame at `offset_secs`
    pub fn build_args(path: &Path, offset_secs: f64) -> Vec<String> {
        vec![
            "-v".to_string(),
            "error".to_string(),
            "-ss".to_string(),
            format!("{:.3}", offset_secs.max(0.0)),
            "-i".to_string(),
            path.to_string_lossy().to_string(),
            "-frames:v".to_string(),
            "1".to_string(),
            "-vf".to_string(),
            format!("scale={}:-2", THUMBNAIL_WIDTH),
            "-f".to_string(),
            "image2pipe".to_string(),
            "-vcodec".to_string(),
            "mjpeg".to_string(),
            "pipe:1".to_string(),
        ]
    }
}

impl Default for FfmpegThumbnailAdapter {
    fn default() -> Self {
        Self::new("ffmpeg", DEFAULT_THUMBNAIL_TIMEOUT)
    }
}

#[async_trait]
impl ThumbnailPort for FfmpegThumbnailAdapter {
    async fn thumbnail(&self, path: &Path, offset_secs: f64) -> Result<Vec<u8>, ExtractionError> {
        run_tool(&self.program, Self::build_args(path, offset_secs), self.timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_args() {
        let args = FfmpegThumbnailAdapter::build_args(Path::new("/v/a.mp4"), 1.5);
        assert!(args.windows(2).any(|w| w[0] == "-ss" && w[1] == "1.500"));
        assert!(args.windows(2).any(|w| w[0] == "-i" && w[1] == "/v/a.mp4"));
        assert!(args.contains(&"image2pipe".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("pipe:1"));

        let args = FfmpegThumbnailAdapter::build_args(Path::new("a.mp4"), -4.0);
        assert!(args.contains(&"0.000".to_string()));
    }
}
