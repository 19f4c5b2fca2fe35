//! Probe document contract and its mapping onto [`MediaRecord`].

use serde::Deserialize;
use serde_json::Value;

use super::{AudioStreamInfo, HdrFormat, MediaRecord, VideoStreamInfo};
use crate::domain::errors::ExtractionError;
use crate::utils::{FieldFormatter, NOT_AVAILABLE};

/// Structured document returned by the probing collaborator
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeDocument {
    pub format: Option<ProbeFormat>,
    #[serde(default)]
    pub streams: Vec<ProbeStream>,
}

/// Container section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeFormat {
    pub format_name: Option<String>,
    pub format_long_name: Option<String>,
    pub duration: Option<String>,
    pub bit_rate: Option<String>,
    pub nb_streams: Option<u32>,
}

/// One entry of the streams section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeStream {
    #[serde(default)]
    pub codec_type: String,
    pub codec_name: Option<String>,
    pub codec_long_name: Option<String>,
    pub profile: Option<String>,
    pub level: Option<Value>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub display_aspect_ratio: Option<String>,
    pub sample_aspect_ratio: Option<String>,
    pub r_frame_rate: Option<String>,
    pub avg_frame_rate: Option<String>,
    pub bit_rate: Option<String>,
    pub pix_fmt: Option<String>,
    pub color_space: Option<String>,
    pub color_primaries: Option<String>,
    pub color_transfer: Option<String>,
    pub color_range: Option<String>,
    pub bits_per_raw_sample: Option<Value>,
    pub sample_rate: Option<String>,
    pub channels: Option<u32>,
    pub channel_layout: Option<String>,
    pub bits_per_sample: Option<u32>,
    pub sample_fmt: Option<String>,
}

fn text(value: Option<String>) -> String {
    value
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn scalar(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn bit_rate(raw: Option<&str>) -> (Option<u64>, String) {
    let raw = raw.unwrap_or(NOT_AVAILABLE);
    (raw.trim().parse().ok(), FieldFormatter::bitrate(raw))
}

impl ProbeStream {
    fn into_video(self) -> VideoStreamInfo {
        let (width, height) = match (self.width.unwrap_or(0), self.height.unwrap_or(0)) {
            (w, h) if w > 0 && h > 0 => (w, h),
            _ => (0, 0),
        };
        let (bit_rate, bit_rate_human) = bit_rate(self.bit_rate.as_deref());
        let color_transfer = text(self.color_transfer);
        let color_primaries = text(self.color_primaries);
        let hdr_format = HdrFormat::classify(&color_transfer, &color_primaries);

        VideoStreamInfo {
            codec_name: text(self.codec_name),
            codec_long_name: text(self.codec_long_name),
            profile: text(self.profile),
            level: scalar(self.level),
            width,
            height,
            display_aspect_ratio: text(self.display_aspect_ratio),
            sample_aspect_ratio: text(self.sample_aspect_ratio),
            frame_rate: self
                .r_frame_rate
                .as_deref()
                .and_then(FieldFormatter::parse_frame_rate),
            avg_frame_rate: self
                .avg_frame_rate
                .as_deref()
                .and_then(FieldFormatter::parse_frame_rate),
            bit_rate,
            bit_rate_human,
            pix_fmt: text(self.pix_fmt),
            color_space: text(self.color_space),
            color_primaries,
            color_transfer,
            color_range: text(self.color_range),
            hdr_format,
            bits_per_raw_sample: scalar(self.bits_per_raw_sample),
        }
    }

    fn into_audio(self) -> AudioStreamInfo {
        let (bit_rate, bit_rate_human) = bit_rate(self.bit_rate.as_deref());

        AudioStreamInfo {
            codec_name: text(self.codec_name),
            codec_long_name: text(self.codec_long_name),
            profile: text(self.profile),
            sample_rate: self.sample_rate.and_then(|s| s.trim().parse().ok()),
            channels: self.channels.unwrap_or(0),
            channel_layout: text(self.channel_layout),
            bit_rate,
            bit_rate_human,
            bits_per_sample: self.bits_per_sample.unwrap_or(0),
            sample_fmt: text(self.sample_fmt),
        }
    }
}

impl MediaRecord {
    /// Map a probe document onto a record
    ///
    /// Only the first video and the first audio stream in document order are
    /// kept. A document without a container section is incomplete.
    pub fn from_probe(
        filename: impl Into<String>,
        file_size: u64,
        document: ProbeDocument,
    ) -> Result<Self, ExtractionError> {
        let format = document.format.ok_or_else(|| {
            ExtractionError::IncompleteRecord("container section missing".to_string())
        })?;

        let duration = format
            .duration
            .as_deref()
            .and_then(|d| d.trim().parse::<f64>().ok())
            .filter(|d| d.is_finite())
            .unwrap_or(0.0);
        let (bit_rate, bit_rate_human) = bit_rate(format.bit_rate.as_deref());

        let mut video = None;
        let mut audio = None;
        for stream in document.streams {
            if stream.codec_type == "video" {
                if video.is_none() {
                    video = Some(stream.into_video());
                }
            } else if stream.codec_type == "audio" && audio.is_none() {
                audio = Some(stream.into_audio());
            }
        }

        Ok(Self {
            filename: filename.into(),
            file_size,
            file_size_human: FieldFormatter::file_size(file_size),
            format_name: text(format.format_name),
            format_long_name: text(format.format_long_name),
            duration,
            duration_human: FieldFormatter::duration(duration),
            bit_rate,
            bit_rate_human,
            nb_streams: format.nb_streams.unwrap_or(0),
            video,
            audio,
            error: None,
        })
    }
}
