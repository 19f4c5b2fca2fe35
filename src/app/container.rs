use std::sync::Arc;

use crate::adapters::{
    FfmpegThumbnailAdapter, FfprobeAdapter, WkhtmlRasterizeAdapter,
};
use crate::adapters::toml_config::AppConfig;
use crate::app::{ExtractInteractor, ReportInteractor, Session};
use crate::ports::{ProbePort, RasterizePort, ThumbnailPort};

pub trait AppContainer: Send + Sync {
    fn extract_interactor(&self) -> Arc<ExtractInteractor>;
    fn report_interactor(&self) -> Arc<ReportInteractor>;

    /// Fresh session sharing this container's extractor
    fn new_session(&self) -> Session {
        Session::new(self.extract_interactor())
    }
}

pub struct DefaultAppContainer {
    extract_interactor: Arc<ExtractInteractor>,
    report_interactor: Arc<ReportInteractor>,
}

impl DefaultAppContainer {
    /// Wire the external-tool adapters from resolved configuration
    pub fn new(config: &AppConfig) -> Self {
        let probe_port = Arc::new(FfprobeAdapter::new(
            config.ffprobe_path.clone(),
            config.probe_timeout(),
        ));
        let thumbnail_port = Arc::new(FfmpegThumbnailAdapter::new(
            config.ffmpeg_path.clone(),
            config.thumbnail_timeout(),
        ));
        let rasterize_port = Arc::new(WkhtmlRasterizeAdapter::new(
            config.rasterizer_path.clone(),
            config.render_timeout(),
        ));

        let extract_interactor = Arc::new(ExtractInteractor::new(
            Arc::clone(&probe_port) as Arc<dyn ProbePort>,
        ));

        let report_interactor = Arc::new(ReportInteractor::new(
            Arc::clone(&thumbnail_port) as Arc<dyn ThumbnailPort>,
            Arc::clone(&rasterize_port) as Arc<dyn RasterizePort>,
            config.thumbnail_offset_secs,
        ));

        Self {
            extract_interactor,
            report_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn extract_interactor(&self) -> Arc<ExtractInteractor> {
        Arc::clone(&self.extract_interactor)
    }

    fn report_interactor(&self) -> Arc<ReportInteractor> {
        Arc::clone(&self.report_interactor)
    }
}
