// Domain models - Canonical media records

use serde::Serialize;
use std::fmt;

use crate::domain::errors::ExtractionError;
use crate::utils::{FieldFormatter, NOT_AVAILABLE};

pub mod probe;

pub use probe::{ProbeDocument, ProbeFormat, ProbeStream};

/// Dynamic-range classification derived from color tags.
///
/// This is a heuristic over the transfer and primaries tags only. Content whose
/// HDR metadata lives elsewhere (Dolby Vision RPU side data, for one) is not
/// detected and will usually classify as SDR or Wide Color Gamut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HdrFormat {
    Sdr,
    Hdr10,
    Hlg,
    WideColorGamut,
}

impl HdrFormat {
    /// Classify from ffprobe `color_transfer` and `color_primaries` tags
    pub fn classify(color_transfer: &str, color_primaries: &str) -> Self {
        match color_transfer {
            "smpte2084" => HdrFormat::Hdr10,
            "arib-std-b67" => HdrFormat::Hlg,
            _ if color_primaries == "bt2020" => HdrFormat::WideColorGamut,
            _ => HdrFormat::Sdr,
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            HdrFormat::Sdr => "SDR",
            HdrFormat::Hdr10 => "HDR10/HDR10+",
            HdrFormat::Hlg => "HLG",
            HdrFormat::WideColorGamut => "Wide Color Gamut",
        }
    }
}

impl fmt::Display for HdrFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// First video stream of a file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoStreamInfo {
    pub codec_name: String,
    pub codec_long_name: String,
    pub profile: String,
    pub level: String,
    /// Zero when unknown; always zero together with `height`
    pub width: u32,
    pub height: u32,
    pub display_aspect_ratio: String,
    pub sample_aspect_ratio: String,
    pub frame_rate: Option<f64>,
    pub avg_frame_rate: Option<f64>,
    pub bit_rate: Option<u64>,
    pub bit_rate_human: String,
    pub pix_fmt: String,
    pub color_space: String,
    pub color_primaries: String,
    pub color_transfer: String,
    pub color_range: String,
    pub hdr_format: HdrFormat,
    pub bits_per_raw_sample: String,
}

impl VideoStreamInfo {
    /// Width and height when both are known
    pub fn resolution(&self) -> Option<(u32, u32)> {
        (self.width > 0 && self.height > 0).then_some((self.width, self.height))
    }

    /// `WxH` or the not-available sentinel
    pub fn resolution_label(&self) -> String {
        match self.resolution() {
            Some((w, h)) => format!("{}x{}", w, h),
            None => NOT_AVAILABLE.to_string(),
        }
    }
}

impl Default for VideoStreamInfo {
    fn default() -> Self {
        Self {
            codec_name: NOT_AVAILABLE.to_string(),
            codec_long_name: NOT_AVAILABLE.to_string(),
            profile: NOT_AVAILABLE.to_string(),
            level: NOT_AVAILABLE.to_string(),
            width: 0,
            height: 0,
            display_aspect_ratio: NOT_AVAILABLE.to_string(),
            sample_aspect_ratio: NOT_AVAILABLE.to_string(),
            frame_rate: None,
            avg_frame_rate: None,
            bit_rate: None,
            bit_rate_human: NOT_AVAILABLE.to_string(),
            pix_fmt: NOT_AVAILABLE.to_string(),
            color_space: NOT_AVAILABLE.to_string(),
            color_primaries: NOT_AVAILABLE.to_string(),
            color_transfer: NOT_AVAILABLE.to_string(),
            color_range: NOT_AVAILABLE.to_string(),
            hdr_format: HdrFormat::Sdr,
            bits_per_raw_sample: NOT_AVAILABLE.to_string(),
        }
    }
}

/// First audio stream of a file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioStreamInfo {
    pub codec_name: String,
    pub codec_long_name: String,
    pub profile: String,
    pub sample_rate: Option<u32>,
    pub channels: u32,
    pub channel_layout: String,
    pub bit_rate: Option<u64>,
    pub bit_rate_human: String,
    pub bits_per_sample: u32,
    pub sample_fmt: String,
}

impl AudioStreamInfo {
    /// `"48000 Hz"` or the not-available sentinel
    pub fn sample_rate_label(&self) -> String {
        match self.sample_rate {
            Some(rate) => format!("{} Hz", rate),
            None => NOT_AVAILABLE.to_string(),
        }
    }
}

impl Default for AudioStreamInfo {
    fn default() -> Self {
        Self {
            codec_name: NOT_AVAILABLE.to_string(),
            codec_long_name: NOT_AVAILABLE.to_string(),
            profile: NOT_AVAILABLE.to_string(),
            sample_rate: None,
            channels: 0,
            channel_layout: NOT_AVAILABLE.to_string(),
            bit_rate: None,
            bit_rate_human: NOT_AVAILABLE.to_string(),
            bits_per_sample: 0,
            sample_fmt: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Canonical metadata for one analyzed file
///
/// When `error` is set only `filename` and the size fields are meaningful.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaRecord {
    pub filename: String,
    pub file_size: u64,
    pub file_size_human: String,
    pub format_name: String,
    pub format_long_name: String,
    pub duration: f64,
    pub duration_human: String,
    pub bit_rate: Option<u64>,
    pub bit_rate_human: String,
    pub nb_streams: u32,
    pub video: Option<VideoStreamInfo>,
    pub audio: Option<AudioStreamInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MediaRecord {
    /// Record for a file that could not be analyzed
    pub fn failed(filename: impl Into<String>, file_size: u64, error: &ExtractionError) -> Self {
        Self {
            filename: filename.into(),
            file_size,
            file_size_human: FieldFormatter::file_size(file_size),
            error: Some(error.to_string()),
            ..Self::default()
        }
    }

    /// Whether extraction failed for this record
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl Default for MediaRecord {
    fn default() -> Self {
        Self {
            filename: NOT_AVAILABLE.to_string(),
            file_size: 0,
            file_size_human: NOT_AVAILABLE.to_string(),
            format_name: NOT_AVAILABLE.to_string(),
            format_long_name: NOT_AVAILABLE.to_string(),
            duration: 0.0,
            duration_human: NOT_AVAILABLE.to_string(),
            bit_rate: None,
            bit_rate_human: NOT_AVAILABLE.to_string(),
            nb_streams: 0,
            video: None,
            audio: None,
            error: None,
        }
    }
}
