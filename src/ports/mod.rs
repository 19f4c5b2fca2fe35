// Ports - Interface definitions (contracts)

use async_trait::async_trait;
use std::path::Path;

use crate::domain::errors::ExtractionError;
use crate::domain::model::ProbeDocument;

/// Port for structured media probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Probe a file and return its container and stream sections
    async fn probe(&self, path: &Path) -> Result<ProbeDocument, ExtractionError>;
}

/// Port for grabbing a still frame
#[async_trait]
pub trait ThumbnailPort: Send + Sync {
    /// Encoded image bytes for the frame at `offset_secs`; empty when the
    /// offset lies past the last frame
    async fn thumbnail(&self, path: &Path, offset_secs: f64) -> Result<Vec<u8>, ExtractionError>;
}

/// Port for turning a report document into an image
#[async_trait]
pub trait RasterizePort: Send + Sync {
    /// PNG bytes for the given HTML document
    async fn rasterize(&self, html: &str) -> Result<Vec<u8>, ExtractionError>;
}
