//! FFprobe adapter for media file probing
//!
//! Runs `ffprobe -v quiet -print_format json -show_format -show_streams`
//! and decodes the JSON document.

use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::adapters::process::run_tool;
use crate::domain::errors::ExtractionError;
use crate::domain::model::ProbeDocument;
use crate::ports::ProbePort;

/// Default probe timeout
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// FFprobe-based probe adapter
pub struct FfprobeAdapter {
    program: PathBuf,
    timeout: Duration,
}

impl FfprobeAdapter {
    /// Create new FFprobe adapter
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

impl Default for FfprobeAdapter {
    fn default() -> Self {
        Self::new("ffprobe", DEFAULT_PROBE_TIMEOUT)
    }
}

/// Decode raw ffprobe stdout
pub fn parse_probe_output(stdout: &[u8]) -> Result<ProbeDocument, ExtractionError> {
    let text = String::from_utf8_lossy(stdout);
    if text.trim().is_empty() {
        return Err(ExtractionError::ParseError("empty output".to_string()));
    }
    serde_json::from_str(&text).map_err(|e| ExtractionError::ParseError(e.to_string()))
}

#[async_trait]
impl ProbePort for FfprobeAdapter {
    async fn probe(&self, path: &Path) -> Result<ProbeDocument, ExtractionError> {
        debug!(path = %path.display(), "probing");
        let args = [
            OsStr::new("-v"),
            OsStr::new("quiet"),
            OsStr::new("-print_format"),
            OsStr::new("json"),
            OsStr::new("-show_format"),
            OsStr::new("-show_streams"),
            path.as_os_str(),
        ];
        let stdout = run_tool(&self.program, args, self.timeout).await?;
        parse_probe_output(&stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fixture() {
        let doc = parse_probe_output(include_bytes!("../../../tests/fixtures/h264_1080p.json")).unwrap();
        assert_eq!(doc.streams.len(), 3);
        assert!(doc.format.is_some());
    }

    #[test]
    fn test_parse_rejects_empty_and_garbage() {
        assert_eq!(
            parse_probe_output(b"  \n").unwrap_err(),
            ExtractionError::ParseError("empty output".to_string())
        );
        assert!(matches!(
            parse_probe_output(b"{\"format\": ").unwrap_err(),
            ExtractionError::ParseError(_)
        ));
    }

    #[tokio::test]
    async fn test_missing_ffprobe_binary() {
        let adapter = FfprobeAdapter::new("/nonexistent/bin/ffprobe", DEFAULT_PROBE_TIMEOUT);
        let err = adapter.probe(Path::new("clip.mp4")).await.unwrap_err();
        assert!(matches!(err, ExtractionError::ToolMissing { .. }));
        assert_eq!(
            err.to_string(),
            "ffprobe not found; install ffmpeg to analyze video files"
        );
    }
}
