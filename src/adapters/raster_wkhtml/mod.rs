//! wkhtmltoimage rasterization adapter

use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;

use crate::adapters::process::{run_tool, tool_name};
use crate::domain::errors::ExtractionError;
use crate::ports::RasterizePort;

/// Default rasterization timeout
pub const DEFAULT_RENDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Renders HTML to PNG with `wkhtmltoimage`
pub struct WkhtmlRasterizeAdapter {
    program: PathBuf,
    timeout: Duration,
}

impl WkhtmlRasterizeAdapter {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

impl WkhtmlRasterizeAdapter {
    /// Write `html` to a temporary `.html` file inside `dir`
    fn stage_page(&self, html: &str, dir: &Path) -> Result<NamedTempFile, ExtractionError> {
        let failed = |e: std::io::Error| ExtractionError::ToolFailed {
            tool: tool_name(&self.program),
            status: None,
            stderr: format!("cannot stage report page: {}", e),
        };
        let mut page = tempfile::Builder::new()
            .prefix("diffmovie-report-")
            .suffix(".html")
            .tempfile_in(dir)
            .map_err(failed)?;
        page.write_all(html.as_bytes()).map_err(failed)?;
        Ok(page)
    }
}

impl Default for WkhtmlRasterizeAdapter {
    fn default() -> Self {
        Self::new("wkhtmltoimage", DEFAULT_RENDER_TIMEOUT)
    }
}

#[async_trait]
impl RasterizePort for WkhtmlRasterizeAdapter {
    async fn rasterize(&self, html: &str) -> Result<Vec<u8>, ExtractionError> {
        // wkhtmltoimage wants a file; the temp file lives until this call returns
        let page = self.stage_page(html, &std::env::temp_dir())?;

        let args = vec![
            "--quiet".to_string(),
            "--format".to_string(),
            "png".to_string(),
            page.path().to_string_lossy().to_string(),
            "-".to_string(),
        ];
        let png = run_tool(&self.program, args, self.timeout).await?;
        if png.is_empty() {
            return Err(ExtractionError::IncompleteRecord(
                "rasterizer produced no image".to_string(),
            ));
        }
        Ok(png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_rasterizer_reports_tool_missing() {
        let adapter = WkhtmlRasterizeAdapter::new("/nonexistent/wkhtmltoimage", DEFAULT_RENDER_TIMEOUT);
        let err = adapter.rasterize("<html></html>").await.unwrap_err();
        assert!(matches!(err, ExtractionError::ToolMissing { .. }));
    }

    #[test]
    fn test_staging_failure_is_tool_failed() {
        let adapter = WkhtmlRasterizeAdapter::default();
        let err = adapter
            .stage_page("<html></html>", Path::new("/nonexistent/diffmovie-staging"))
            .unwrap_err();
        match &err {
            ExtractionError::ToolFailed { tool, status, stderr } => {
                assert_eq!(tool, "wkhtmltoimage");
                assert_eq!(*status, None);
                assert!(stderr.starts_with("cannot stage report page"));
            }
            other => panic!("expected ToolFailed, got {:?}", other),
        }
        assert!(err.to_string().starts_with("wkhtmltoimage failed: cannot stage report page"));
    }

    #[test]
    fn test_staged_page_holds_document() {
        let dir = tempfile::tempdir().unwrap();
        let page = WkhtmlRasterizeAdapter::default()
            .stage_page("<p>hi</p>", dir.path())
            .unwrap();
        assert_eq!(std::fs::read_to_string(page.path()).unwrap(), "<p>hi</p>");
        assert!(page.path().to_string_lossy().ends_with(".html"));
    }
}
