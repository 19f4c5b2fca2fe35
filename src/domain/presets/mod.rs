// Presets - static reference specifications for common delivery targets

use crate::domain::errors::DomainError;
use crate::domain::fields::{FieldKey, FlatFields};

/// Container string ffprobe reports for mp4 and mov files
const MP4_FAMILY: &str = "mov,mp4,m4a,3gp,3g2,mj2";

/// A named target profile shaped like a flattened record without stream data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [(FieldKey, &'static str)],
}

impl Preset {
    /// Field projection with quantities parsed from the display strings
    pub fn to_fields(&self) -> FlatFields {
        FlatFields::from_pairs(self.fields.iter().copied())
    }
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "youtube-hd",
        description: "YouTube 1080p upload",
        fields: &[
            (FieldKey::ContainerFormat, MP4_FAMILY),
            (FieldKey::VideoCodec, "h264"),
            (FieldKey::Resolution, "1920x1080"),
            (FieldKey::Width, "1920"),
            (FieldKey::Height, "1080"),
            (FieldKey::FrameRate, "30.000"),
            (FieldKey::VideoBitrate, "8.00 Mbps"),
            (FieldKey::PixelFormat, "yuv420p"),
            (FieldKey::AudioCodec, "aac"),
            (FieldKey::SampleRate, "48000 Hz"),
            (FieldKey::Channels, "2"),
            (FieldKey::AudioBitrate, "384.00 Kbps"),
        ],
    },
    Preset {
        name: "youtube-4k",
        description: "YouTube 2160p upload",
        fields: &[
            (FieldKey::ContainerFormat, MP4_FAMILY),
            (FieldKey::VideoCodec, "h264"),
            (FieldKey::Resolution, "3840x2160"),
            (FieldKey::Width, "3840"),
            (FieldKey::Height, "2160"),
            (FieldKey::FrameRate, "30.000"),
            (FieldKey::VideoBitrate, "45.00 Mbps"),
            (FieldKey::PixelFormat, "yuv420p"),
            (FieldKey::AudioCodec, "aac"),
            (FieldKey::SampleRate, "48000 Hz"),
            (FieldKey::Channels, "2"),
            (FieldKey::AudioBitrate, "384.00 Kbps"),
        ],
    },
    Preset {
        name: "instagram-reel",
        description: "Instagram Reels, vertical 9:16",
        fields: &[
            (FieldKey::ContainerFormat, MP4_FAMILY),
            (FieldKey::VideoCodec, "h264"),
            (FieldKey::Resolution, "1080x1920"),
            (FieldKey::Width, "1080"),
            (FieldKey::Height, "1920"),
            (FieldKey::FrameRate, "30.000"),
            (FieldKey::VideoBitrate, "5.00 Mbps"),
            (FieldKey::PixelFormat, "yuv420p"),
            (FieldKey::AudioCodec, "aac"),
            (FieldKey::SampleRate, "44100 Hz"),
            (FieldKey::Channels, "2"),
            (FieldKey::AudioBitrate, "128.00 Kbps"),
        ],
    },
    Preset {
        name: "tiktok",
        description: "TikTok, vertical 9:16",
        fields: &[
            (FieldKey::ContainerFormat, MP4_FAMILY),
            (FieldKey::VideoCodec, "h264"),
            (FieldKey::Resolution, "1080x1920"),
            (FieldKey::Width, "1080"),
            (FieldKey::Height, "1920"),
            (FieldKey::FrameRate, "30.000"),
            (FieldKey::VideoBitrate, "6.00 Mbps"),
            (FieldKey::PixelFormat, "yuv420p"),
            (FieldKey::AudioCodec, "aac"),
            (FieldKey::SampleRate, "44100 Hz"),
            (FieldKey::Channels, "2"),
            (FieldKey::AudioBitrate, "128.00 Kbps"),
        ],
    },
    Preset {
        name: "twitter",
        description: "X/Twitter 720p timeline video",
        fields: &[
            (FieldKey::ContainerFormat, MP4_FAMILY),
            (FieldKey::VideoCodec, "h264"),
            (FieldKey::Resolution, "1280x720"),
            (FieldKey::Width, "1280"),
            (FieldKey::Height, "720"),
            (FieldKey::FrameRate, "30.000"),
            (FieldKey::VideoBitrate, "5.00 Mbps"),
            (FieldKey::PixelFormat, "yuv420p"),
            (FieldKey::AudioCodec, "aac"),
            (FieldKey::SampleRate, "44100 Hz"),
            (FieldKey::Channels, "2"),
            (FieldKey::AudioBitrate, "128.00 Kbps"),
        ],
    },
    Preset {
        name: "broadcast-hd",
        description: "1080i29.97 broadcast transport stream",
        fields: &[
            (FieldKey::ContainerFormat, "mpegts"),
            (FieldKey::VideoCodec, "h264"),
            (FieldKey::Resolution, "1920x1080"),
            (FieldKey::Width, "1920"),
            (FieldKey::Height, "1080"),
            (FieldKey::FrameRate, "29.970"),
            (FieldKey::VideoBitrate, "20.00 Mbps"),
            (FieldKey::PixelFormat, "yuv420p"),
            (FieldKey::AudioCodec, "ac3"),
            (FieldKey::SampleRate, "48000 Hz"),
            (FieldKey::Channels, "2"),
            (FieldKey::AudioBitrate, "192.00 Kbps"),
        ],
    },
    Preset {
        name: "prores-master",
        description: "ProRes 422 HQ mezzanine",
        fields: &[
            (FieldKey::ContainerFormat, MP4_FAMILY),
            (FieldKey::VideoCodec, "prores"),
            (FieldKey::VideoProfile, "HQ"),
            (FieldKey::Resolution, "1920x1080"),
            (FieldKey::Width, "1920"),
            (FieldKey::Height, "1080"),
            (FieldKey::FrameRate, "23.976"),
            (FieldKey::PixelFormat, "yuv422p10le"),
            (FieldKey::AudioCodec, "pcm_s24le"),
            (FieldKey::SampleRate, "48000 Hz"),
            (FieldKey::Channels, "2"),
        ],
    },
];

/// Look up a preset by name
pub fn find(name: &str) -> Result<&'static Preset, DomainError> {
    PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| DomainError::UnknownPreset(name.to_string()))
}

/// Registered preset names
pub fn names() -> Vec<&'static str> {
    PRESETS.iter().map(|p| p.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fields::Quantity;

    #[test]
    fn test_find_known_and_unknown() {
        assert_eq!(find("tiktok").unwrap().name, "tiktok");
        assert_eq!(find(" YouTube-HD ").unwrap().name, "youtube-hd");
        assert_eq!(
            find("vhs").unwrap_err(),
            DomainError::UnknownPreset("vhs".to_string())
        );
    }

    #[test]
    fn test_presets_have_no_stream_markers() {
        for preset in PRESETS {
            let fields = preset.to_fields();
            assert!(fields.get(FieldKey::VideoStream).is_none(), "{}", preset.name);
            assert!(fields.get(FieldKey::Filename).is_none(), "{}", preset.name);
            let keys: Vec<FieldKey> = fields.keys().collect();
            let mut sorted = keys.clone();
            sorted.sort();
            assert_eq!(keys, sorted, "{} is out of vocabulary order", preset.name);
        }
    }

    #[test]
    fn test_preset_quantities_are_parsed() {
        let fields = find("youtube-hd").unwrap().to_fields();
        assert_eq!(fields.get(FieldKey::Width).unwrap().quantity, Quantity::Approx(1920.0));
        assert_eq!(
            fields.get(FieldKey::VideoBitrate).unwrap().quantity.as_f64(),
            Some(8_000_000.0)
        );
    }

    #[test]
    fn test_names_are_unique() {
        let mut names = names();
        let count = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), count);
        assert_eq!(count, 7);
    }
}
