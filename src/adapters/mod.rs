// Adapters - External system implementations

pub mod probe_ffprobe;
pub mod process;
pub mod raster_wkhtml;
pub mod thumb_ffmpeg;
pub mod toml_config;

// Re-export adapters
pub use probe_ffprobe::FfprobeAdapter;
pub use raster_wkhtml::WkhtmlRasterizeAdapter;
pub use thumb_ffmpeg::FfmpegThumbnailAdapter;
pub use toml_config::TomlConfigAdapter;
