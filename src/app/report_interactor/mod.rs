// Report interactor - Builds and writes the comparison report

use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::app::session::ComparisonSet;
use crate::error::DiffMovieResult;
use crate::output::report::{render_html, ReportColumn, ReportContent};
use crate::output::writer::OutputWriter;
use crate::ports::{RasterizePort, ThumbnailPort};
use crate::utils::path::PathUtils;

/// Finished report in the best format that could be produced
#[derive(Debug, Clone, PartialEq)]
pub enum ReportArtifact {
    Png(Vec<u8>),
    Html(String),
}

/// Interactor for the report use case
pub struct ReportInteractor {
    thumbnail_port: Arc<dyn ThumbnailPort>,
    rasterize_port: Arc<dyn RasterizePort>,
    thumbnail_offset: f64,
}

impl ReportInteractor {
    pub fn new(
        thumbnail_port: Arc<dyn ThumbnailPort>,
        rasterize_port: Arc<dyn RasterizePort>,
        thumbnail_offset: f64,
    ) -> Self {
        Self {
            thumbnail_port,
            rasterize_port,
            thumbnail_offset,
        }
    }

    /// Still frame as a `data:` URI
    ///
    /// Retries once at the start of the file when the requested offset gives
    /// nothing, which happens for clips shorter than the offset.
    pub async fn thumbnail_data_uri(&self, path: &Path) -> Option<String> {
        let mut offsets = vec![self.thumbnail_offset];
        if self.thumbnail_offset > 0.0 {
            offsets.push(0.0);
        }

        for offset in offsets {
            match self.thumbnail_port.thumbnail(path, offset).await {
                Ok(bytes) if !bytes.is_empty() => {
                    return Some(format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes)));
                }
                Ok(_) => debug!(path = %path.display(), offset, "no frame at offset"),
                Err(e) => debug!(path = %path.display(), offset, "thumbnail failed: {}", e),
            }
        }

        warn!("No thumbnail for {}", path.display());
        None
    }

    /// Build the HTML document for a comparison set
    pub async fn build_html(&self, set: &ComparisonSet, only_different: bool) -> DiffMovieResult<String> {
        let table = set.field_table(only_different)?;
        let summaries = set.summaries()?;
        let base = set.base_index();

        let mut columns = Vec::with_capacity(set.len());
        for (i, entry) in set.entries().iter().enumerate() {
            let thumbnail = match entry.path() {
                Some(path) if !entry.is_error() => self.thumbnail_data_uri(path).await,
                _ => None,
            };
            columns.push(ReportColumn {
                label: entry.label.clone(),
                is_base: Some(i) == base,
                thumbnail,
            });
        }

        Ok(render_html(&ReportContent {
            columns,
            table,
            summaries,
            generated_at: Utc::now(),
        }))
    }

    /// Rasterize when asked, falling back to the HTML document
    pub async fn render(
        &self,
        set: &ComparisonSet,
        only_different: bool,
        want_image: bool,
    ) -> DiffMovieResult<ReportArtifact> {
        let html = self.build_html(set, only_different).await?;
        if !want_image {
            return Ok(ReportArtifact::Html(html));
        }

        match self.rasterize_port.rasterize(&html).await {
            Ok(png) => Ok(ReportArtifact::Png(png)),
            Err(e) => {
                warn!("Rasterization unavailable, keeping HTML: {}", e);
                Ok(ReportArtifact::Html(html))
            }
        }
    }

    /// Write the report to `path`; a `.png` path is rasterized when possible
    ///
    /// Returns the path actually written, which switches to `.html` when a
    /// requested image could not be produced.
    pub async fn write(
        &self,
        set: &ComparisonSet,
        only_different: bool,
        path: &Path,
    ) -> DiffMovieResult<PathBuf> {
        let want_image = PathUtils::get_extension(path).as_deref() == Some("png");

        let written = match self.render(set, only_different, want_image).await? {
            ReportArtifact::Png(png) => {
                OutputWriter::write_atomic(path, &png)?;
                path.to_path_buf()
            }
            ReportArtifact::Html(html) => {
                let target = if want_image {
                    path.with_extension("html")
                } else {
                    path.to_path_buf()
                };
                OutputWriter::write_atomic(&target, html.as_bytes())?;
                target
            }
        };

        info!("Report written to {}", written.display());
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::domain::errors::ExtractionError;
    use crate::domain::model::MediaRecord;

    /// Yields nothing past offset zero and records every request
    struct ShortClip {
        calls: Mutex<Vec<f64>>,
    }

    #[async_trait]
    impl ThumbnailPort for ShortClip {
        async fn thumbnail(&self, _path: &Path, offset: f64) -> Result<Vec<u8>, ExtractionError> {
            self.calls.lock().unwrap().push(offset);
            Ok(if offset == 0.0 { vec![0xff, 0xd8] } else { vec![] })
        }
    }

    struct NoRasterizer;

    #[async_trait]
    impl RasterizePort for NoRasterizer {
        async fn rasterize(&self, _html: &str) -> Result<Vec<u8>, ExtractionError> {
            Err(ExtractionError::ToolMissing {
                tool: "wkhtmltoimage".to_string(),
            })
        }
    }

    fn interactor(thumbs: Arc<ShortClip>) -> ReportInteractor {
        ReportInteractor::new(thumbs, Arc::new(NoRasterizer), 1.0)
    }

    fn set() -> ComparisonSet {
        let mut set = ComparisonSet::new();
        let record = MediaRecord {
            filename: "a.mp4".to_string(),
            ..MediaRecord::default()
        };
        set.add_record(PathBuf::from("a.mp4"), record);
        set.add_preset("youtube-hd").unwrap();
        set
    }

    #[tokio::test]
    async fn test_thumbnail_retries_at_zero() {
        let thumbs = Arc::new(ShortClip {
            calls: Mutex::new(vec![]),
        });
        let uri = interactor(thumbs.clone())
            .thumbnail_data_uri(Path::new("a.mp4"))
            .await;
        assert_eq!(uri.as_deref(), Some("data:image/jpeg;base64,/9g="));
        assert_eq!(*thumbs.calls.lock().unwrap(), vec![1.0, 0.0]);
    }

    #[tokio::test]
    async fn test_png_request_falls_back_to_html() {
        let dir = tempfile::tempdir().unwrap();
        let thumbs = Arc::new(ShortClip {
            calls: Mutex::new(vec![]),
        });
        let written = interactor(thumbs)
            .write(&set(), false, &dir.path().join("report.png"))
            .await
            .unwrap();

        assert_eq!(written, dir.path().join("report.html"));
        let html = std::fs::read_to_string(&written).unwrap();
        assert!(html.contains("preset:youtube-hd (base)"));
        assert!(html.contains("data:image/jpeg;base64,"));
    }
}
