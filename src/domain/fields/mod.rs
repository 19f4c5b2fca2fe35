// Field vocabulary and the record flattener

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

use crate::domain::model::MediaRecord;
use crate::utils::{FieldFormatter, NOT_AVAILABLE};

/// Value shown for an absent stream category
pub const NONE_MARKER: &str = "none";

/// Fixed display vocabulary, declared in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKey {
    Error,
    Filename,
    FileSize,
    ContainerFormat,
    FormatDetails,
    Duration,
    DurationSeconds,
    OverallBitrate,
    StreamCount,
    VideoStream,
    VideoCodec,
    VideoCodecDetails,
    VideoProfile,
    VideoLevel,
    Resolution,
    Width,
    Height,
    DisplayAspectRatio,
    SampleAspectRatio,
    FrameRate,
    AvgFrameRate,
    VideoBitrate,
    PixelFormat,
    ColorSpace,
    ColorPrimaries,
    ColorTransfer,
    ColorRange,
    HdrFormat,
    VideoBitDepth,
    AudioStream,
    AudioCodec,
    AudioCodecDetails,
    AudioProfile,
    SampleRate,
    Channels,
    ChannelLayout,
    AudioBitrate,
    AudioBitDepth,
    SampleFormat,
}

/// How a field's value is quantified for diff annotations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain number: delta and ratio
    Numeric,
    /// Byte count: ratio
    Size,
    /// Bits per second: ratio
    Bitrate,
    /// Anything else: textual transition
    Text,
}

impl FieldKey {
    /// Every key in emission order
    pub const ALL: [FieldKey; 39] = [
        FieldKey::Error,
        FieldKey::Filename,
        FieldKey::FileSize,
        FieldKey::ContainerFormat,
        FieldKey::FormatDetails,
        FieldKey::Duration,
        FieldKey::DurationSeconds,
        FieldKey::OverallBitrate,
        FieldKey::StreamCount,
        FieldKey::VideoStream,
        FieldKey::VideoCodec,
        FieldKey::VideoCodecDetails,
        FieldKey::VideoProfile,
        FieldKey::VideoLevel,
        FieldKey::Resolution,
        FieldKey::Width,
        FieldKey::Height,
        FieldKey::DisplayAspectRatio,
        FieldKey::SampleAspectRatio,
        FieldKey::FrameRate,
        FieldKey::AvgFrameRate,
        FieldKey::VideoBitrate,
        FieldKey::PixelFormat,
        FieldKey::ColorSpace,
        FieldKey::ColorPrimaries,
        FieldKey::ColorTransfer,
        FieldKey::ColorRange,
        FieldKey::HdrFormat,
        FieldKey::VideoBitDepth,
        FieldKey::AudioStream,
        FieldKey::AudioCodec,
        FieldKey::AudioCodecDetails,
        FieldKey::AudioProfile,
        FieldKey::SampleRate,
        FieldKey::Channels,
        FieldKey::ChannelLayout,
        FieldKey::AudioBitrate,
        FieldKey::AudioBitDepth,
        FieldKey::SampleFormat,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            FieldKey::Error => "error",
            FieldKey::Filename => "filename",
            FieldKey::FileSize => "file size",
            FieldKey::ContainerFormat => "container format",
            FieldKey::FormatDetails => "format details",
            FieldKey::Duration => "duration",
            FieldKey::DurationSeconds => "duration (seconds)",
            FieldKey::OverallBitrate => "overall bitrate",
            FieldKey::StreamCount => "stream count",
            FieldKey::VideoStream => "video stream",
            FieldKey::VideoCodec => "video codec",
            FieldKey::VideoCodecDetails => "video codec details",
            FieldKey::VideoProfile => "video profile",
            FieldKey::VideoLevel => "video level",
            FieldKey::Resolution => "resolution",
            FieldKey::Width => "resolution (width)",
            FieldKey::Height => "resolution (height)",
            FieldKey::DisplayAspectRatio => "aspect ratio (DAR)",
            FieldKey::SampleAspectRatio => "aspect ratio (SAR)",
            FieldKey::FrameRate => "frame rate (fps)",
            FieldKey::AvgFrameRate => "average frame rate",
            FieldKey::VideoBitrate => "video bitrate",
            FieldKey::PixelFormat => "pixel format",
            FieldKey::ColorSpace => "color space",
            FieldKey::ColorPrimaries => "color primaries",
            FieldKey::ColorTransfer => "transfer characteristics",
            FieldKey::ColorRange => "color range",
            FieldKey::HdrFormat => "HDR format",
            FieldKey::VideoBitDepth => "bit depth (video)",
            FieldKey::AudioStream => "audio stream",
            FieldKey::AudioCodec => "audio codec",
            FieldKey::AudioCodecDetails => "audio codec details",
            FieldKey::AudioProfile => "audio profile",
            FieldKey::SampleRate => "sample rate",
            FieldKey::Channels => "channel count",
            FieldKey::ChannelLayout => "channel layout",
            FieldKey::AudioBitrate => "audio bitrate",
            FieldKey::AudioBitDepth => "bit depth (audio)",
            FieldKey::SampleFormat => "sample format",
        }
    }

    /// Quantification used by the pairwise diff
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldKey::DurationSeconds
            | FieldKey::Width
            | FieldKey::Height
            | FieldKey::FrameRate
            | FieldKey::AvgFrameRate
            | FieldKey::Channels
            | FieldKey::StreamCount => FieldKind::Numeric,
            FieldKey::FileSize => FieldKind::Size,
            key if key.label().contains("bitrate") => FieldKind::Bitrate,
            _ => FieldKind::Text,
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for FieldKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Typed numeric reading of a display value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quantity {
    Exact(u64),
    Approx(f64),
    Unknown,
}

impl Quantity {
    /// Numeric value, if any
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Quantity::Exact(v) => Some(*v as f64),
            Quantity::Approx(v) => Some(*v),
            Quantity::Unknown => None,
        }
    }
}

impl From<Option<u64>> for Quantity {
    fn from(value: Option<u64>) -> Self {
        value.map(Quantity::Exact).unwrap_or(Quantity::Unknown)
    }
}

impl From<Option<f64>> for Quantity {
    fn from(value: Option<f64>) -> Self {
        value.map(Quantity::Approx).unwrap_or(Quantity::Unknown)
    }
}

/// A display value with its optional typed quantity
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
    pub text: String,
    pub quantity: Quantity,
}

impl FieldValue {
    /// Value with a known quantity
    pub fn measured(text: impl Into<String>, quantity: Quantity) -> Self {
        Self {
            text: text.into(),
            quantity,
        }
    }

    /// Value with no quantity
    pub fn text(text: impl Into<String>) -> Self {
        Self::measured(text, Quantity::Unknown)
    }

    /// Value known only in display form; the quantity is recovered by parsing
    pub fn parse(key: FieldKey, text: impl Into<String>) -> Self {
        let text = text.into();
        let quantity = match key.kind() {
            FieldKind::Numeric => text.trim().parse::<f64>().ok().into(),
            FieldKind::Size => FieldFormatter::parse_size(&text).into(),
            FieldKind::Bitrate => FieldFormatter::parse_bitrate(&text).into(),
            FieldKind::Text => Quantity::Unknown,
        };
        Self { text, quantity }
    }
}

/// Ordered display projection of a record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatFields {
    entries: Vec<(FieldKey, FieldValue)>,
}

impl FlatFields {
    /// Empty projection
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from display-form pairs, recovering quantities by parsing
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (FieldKey, &'a str)>) -> Self {
        let mut fields = Self::new();
        for (key, text) in pairs {
            fields.push(key, FieldValue::parse(key, text));
        }
        fields
    }

    /// Append a field, replacing an earlier value for the same key in place
    pub fn push(&mut self, key: FieldKey, value: FieldValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: FieldKey) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Display text for a key
    pub fn text(&self, key: FieldKey) -> Option<&str> {
        self.get(key).map(|v| v.text.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether this projection is an error presentation
    pub fn is_error(&self) -> bool {
        self.get(FieldKey::Error).is_some()
    }
}

impl Serialize for FlatFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key.label(), &value.text)?;
        }
        map.end()
    }
}

/// Project a record onto the field vocabulary
///
/// An errored record becomes the single `error` field. A missing stream
/// category contributes only its marker field set to `"none"`.
pub fn flatten(record: &MediaRecord) -> FlatFields {
    let mut fields = FlatFields::new();

    if let Some(error) = &record.error {
        fields.push(FieldKey::Error, FieldValue::text(error));
        return fields;
    }

    fields.push(FieldKey::Filename, FieldValue::text(&record.filename));
    fields.push(
        FieldKey::FileSize,
        FieldValue::measured(&record.file_size_human, Quantity::Exact(record.file_size)),
    );
    fields.push(FieldKey::ContainerFormat, FieldValue::text(&record.format_name));
    fields.push(FieldKey::FormatDetails, FieldValue::text(&record.format_long_name));
    fields.push(FieldKey::Duration, FieldValue::text(&record.duration_human));
    fields.push(
        FieldKey::DurationSeconds,
        FieldValue::measured(format!("{:.3}", record.duration), Quantity::Approx(record.duration)),
    );
    fields.push(
        FieldKey::OverallBitrate,
        FieldValue::measured(&record.bit_rate_human, record.bit_rate.into()),
    );
    fields.push(
        FieldKey::StreamCount,
        FieldValue::measured(
            record.nb_streams.to_string(),
            Quantity::Exact(record.nb_streams as u64),
        ),
    );

    match &record.video {
        Some(v) => {
            fields.push(FieldKey::VideoCodec, FieldValue::text(&v.codec_name));
            fields.push(FieldKey::VideoCodecDetails, FieldValue::text(&v.codec_long_name));
            fields.push(FieldKey::VideoProfile, FieldValue::text(&v.profile));
            fields.push(FieldKey::VideoLevel, FieldValue::text(&v.level));
            fields.push(FieldKey::Resolution, FieldValue::text(v.resolution_label()));
            fields.push(
                FieldKey::Width,
                FieldValue::measured(v.width.to_string(), Quantity::Exact(v.width as u64)),
            );
            fields.push(
                FieldKey::Height,
                FieldValue::measured(v.height.to_string(), Quantity::Exact(v.height as u64)),
            );
            fields.push(FieldKey::DisplayAspectRatio, FieldValue::text(&v.display_aspect_ratio));
            fields.push(FieldKey::SampleAspectRatio, FieldValue::text(&v.sample_aspect_ratio));
            fields.push(
                FieldKey::FrameRate,
                FieldValue::measured(FieldFormatter::frame_rate(v.frame_rate), v.frame_rate.into()),
            );
            fields.push(
                FieldKey::AvgFrameRate,
                FieldValue::measured(
                    FieldFormatter::frame_rate(v.avg_frame_rate),
                    v.avg_frame_rate.into(),
                ),
            );
            fields.push(
                FieldKey::VideoBitrate,
                FieldValue::measured(&v.bit_rate_human, v.bit_rate.into()),
            );
            fields.push(FieldKey::PixelFormat, FieldValue::text(&v.pix_fmt));
            fields.push(FieldKey::ColorSpace, FieldValue::text(&v.color_space));
            fields.push(FieldKey::ColorPrimaries, FieldValue::text(&v.color_primaries));
            fields.push(FieldKey::ColorTransfer, FieldValue::text(&v.color_transfer));
            fields.push(FieldKey::ColorRange, FieldValue::text(&v.color_range));
            fields.push(FieldKey::HdrFormat, FieldValue::text(v.hdr_format.label()));
            fields.push(FieldKey::VideoBitDepth, FieldValue::text(&v.bits_per_raw_sample));
        }
        None => fields.push(FieldKey::VideoStream, FieldValue::text(NONE_MARKER)),
    }

    match &record.audio {
        Some(a) => {
            fields.push(FieldKey::AudioCodec, FieldValue::text(&a.codec_name));
            fields.push(FieldKey::AudioCodecDetails, FieldValue::text(&a.codec_long_name));
            fields.push(FieldKey::AudioProfile, FieldValue::text(&a.profile));
            fields.push(
                FieldKey::SampleRate,
                FieldValue::measured(
                    a.sample_rate_label(),
                    a.sample_rate.map(u64::from).into(),
                ),
            );
            fields.push(
                FieldKey::Channels,
                FieldValue::measured(a.channels.to_string(), Quantity::Exact(a.channels as u64)),
            );
            fields.push(FieldKey::ChannelLayout, FieldValue::text(&a.channel_layout));
            fields.push(
                FieldKey::AudioBitrate,
                FieldValue::measured(&a.bit_rate_human, a.bit_rate.into()),
            );
            let depth = if a.bits_per_sample > 0 {
                a.bits_per_sample.to_string()
            } else {
                NOT_AVAILABLE.to_string()
            };
            fields.push(FieldKey::AudioBitDepth, FieldValue::text(depth));
            fields.push(FieldKey::SampleFormat, FieldValue::text(&a.sample_fmt));
        }
        None => fields.push(FieldKey::AudioStream, FieldValue::text(NONE_MARKER)),
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{AudioStreamInfo, VideoStreamInfo};

    fn record() -> MediaRecord {
        MediaRecord {
            filename: "a.mp4".to_string(),
            file_size: 2048,
            file_size_human: "2.00 KB".to_string(),
            format_name: "mov,mp4,m4a,3gp,3g2,mj2".to_string(),
            duration: 10.0,
            duration_human: "00:10.000".to_string(),
            nb_streams: 2,
            video: Some(VideoStreamInfo {
                codec_name: "h264".to_string(),
                width: 1280,
                height: 720,
                frame_rate: Some(25.0),
                ..VideoStreamInfo::default()
            }),
            audio: Some(AudioStreamInfo {
                codec_name: "aac".to_string(),
                sample_rate: Some(44_100),
                channels: 2,
                ..AudioStreamInfo::default()
            }),
            ..MediaRecord::default()
        }
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let rec = record();
        assert_eq!(flatten(&rec), flatten(&rec));
    }

    #[test]
    fn test_flatten_follows_vocabulary_order() {
        let fields = flatten(&record());
        let keys: Vec<FieldKey> = fields.keys().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(fields.text(FieldKey::Resolution), Some("1280x720"));
        assert_eq!(fields.text(FieldKey::FrameRate), Some("25.000"));
        assert_eq!(fields.text(FieldKey::SampleRate), Some("44100 Hz"));
        assert_eq!(fields.text(FieldKey::AudioBitDepth), Some("N/A"));
        assert_eq!(fields.text(FieldKey::DurationSeconds), Some("10.000"));
    }

    #[test]
    fn test_flatten_error_record_is_single_field() {
        let rec = MediaRecord {
            error: Some("file not found: a.mp4".to_string()),
            ..record()
        };
        let fields = flatten(&rec);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.text(FieldKey::Error), Some("file not found: a.mp4"));
        assert!(fields.is_error());
    }

    #[test]
    fn test_flatten_missing_streams_emit_marker_only() {
        let rec = MediaRecord {
            video: None,
            audio: None,
            ..record()
        };
        let fields = flatten(&rec);
        assert_eq!(fields.text(FieldKey::VideoStream), Some("none"));
        assert_eq!(fields.text(FieldKey::AudioStream), Some("none"));
        assert!(fields.get(FieldKey::VideoCodec).is_none());
        assert!(fields.get(FieldKey::Channels).is_none());
    }

    #[test]
    fn test_field_kinds() {
        assert_eq!(FieldKey::Width.kind(), FieldKind::Numeric);
        assert_eq!(FieldKey::FileSize.kind(), FieldKind::Size);
        assert_eq!(FieldKey::OverallBitrate.kind(), FieldKind::Bitrate);
        assert_eq!(FieldKey::AudioBitrate.kind(), FieldKind::Bitrate);
        assert_eq!(FieldKey::SampleRate.kind(), FieldKind::Text);
    }

    #[test]
    fn test_parse_recovers_quantities() {
        let v = FieldValue::parse(FieldKey::VideoBitrate, "5.00 Mbps");
        assert_eq!(v.quantity.as_f64(), Some(5_000_000.0));
        let v = FieldValue::parse(FieldKey::FileSize, "1.00 KB");
        assert_eq!(v.quantity, Quantity::Approx(1024.0));
        let v = FieldValue::parse(FieldKey::Width, "wide");
        assert_eq!(v.quantity, Quantity::Unknown);
    }

    #[test]
    fn test_serialize_keeps_order_and_labels() {
        let fields = FlatFields::from_pairs([
            (FieldKey::ContainerFormat, "mp4"),
            (FieldKey::VideoCodec, "h264"),
        ]);
        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(json, r#"{"container format":"mp4","video codec":"h264"}"#);
    }
}
