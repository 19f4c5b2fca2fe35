//! Transcode command synthesis
//!
//! Builds an advisory ffmpeg invocation that would move a source file toward
//! a reference record. Nothing here executes the command. Values that cannot
//! be read from the reference drop their argument and leave the rest intact.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::errors::DomainError;
use crate::domain::model::MediaRecord;
use crate::utils::path::PathUtils;
use crate::utils::NOT_AVAILABLE;

/// Encoder used when the reference video codec has no table entry
pub const DEFAULT_VIDEO_ENCODER: &str = "libx264";

/// Encoder used when the reference audio codec has no table entry
pub const DEFAULT_AUDIO_ENCODER: &str = "aac";

const VIDEO_ENCODERS: &[(&str, &str)] = &[
    ("h264", "libx264"),
    ("hevc", "libx265"),
    ("h265", "libx265"),
    ("vp9", "libvpx-vp9"),
    ("av1", "libaom-av1"),
    ("prores", "prores_ks"),
    ("mpeg4", "mpeg4"),
    ("vp8", "libvpx"),
];

const AUDIO_ENCODERS: &[(&str, &str)] = &[
    ("aac", "aac"),
    ("mp3", "libmp3lame"),
    ("opus", "libopus"),
    ("vorbis", "libvorbis"),
    ("flac", "flac"),
    ("ac3", "ac3"),
    ("eac3", "eac3"),
    ("alac", "alac"),
];

/// Container name tokens to file extensions, checked in order
const CONTAINER_EXTENSIONS: &[(&str, &str)] = &[
    ("mp4", "mp4"),
    ("matroska", "mkv"),
    ("mkv", "mkv"),
    ("webm", "webm"),
    ("mov", "mov"),
    ("avi", "avi"),
    ("mpegts", "ts"),
    ("flv", "flv"),
    ("mxf", "mxf"),
    ("ogg", "ogv"),
    ("asf", "wmv"),
];

/// Map a codec name to its ffmpeg video encoder
pub fn video_encoder(codec: &str) -> &'static str {
    let codec = codec.trim().to_lowercase();
    VIDEO_ENCODERS
        .iter()
        .find(|(name, _)| *name == codec)
        .map(|(_, encoder)| *encoder)
        .unwrap_or(DEFAULT_VIDEO_ENCODER)
}

/// Map a codec name to its ffmpeg audio encoder
pub fn audio_encoder(codec: &str) -> &'static str {
    let codec = codec.trim().to_lowercase();
    AUDIO_ENCODERS
        .iter()
        .find(|(name, _)| *name == codec)
        .map(|(_, encoder)| *encoder)
        .unwrap_or(DEFAULT_AUDIO_ENCODER)
}

/// File extension for a probe container name such as `"matroska,webm"`
pub fn container_extension(format_name: &str) -> Option<&'static str> {
    let format_name = format_name.to_lowercase();
    let tokens: Vec<&str> = format_name.split(',').map(str::trim).collect();
    CONTAINER_EXTENSIONS
        .iter()
        .find(|(token, _)| tokens.contains(token))
        .map(|(_, ext)| *ext)
}

fn trim_decimal(value: f64) -> String {
    let text = format!("{:.3}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Bits per second in ffmpeg's `M`/`K` suffix notation
pub fn bitrate_notation(bps: u64) -> String {
    if bps >= 1_000_000 {
        format!("{}M", trim_decimal(bps as f64 / 1_000_000.0))
    } else if bps >= 1_000 {
        format!("{}K", trim_decimal(bps as f64 / 1_000.0))
    } else {
        bps.to_string()
    }
}

/// `<stem>_converted.<ext>` next to the source
pub fn default_output(source: &Path) -> PathBuf {
    let ext = PathUtils::original_extension(source).unwrap_or_default();
    PathUtils::sibling_with_suffix(source, None, &PathUtils::get_stem(source), "_converted", &ext)
}

/// `<source stem>_to_<base stem>.<ext>` with the extension taken from the base container
pub fn batch_output(
    source: &Path,
    base_stem: &str,
    base: &MediaRecord,
    output_dir: Option<&Path>,
) -> PathBuf {
    let ext = container_extension(&base.format_name)
        .map(str::to_string)
        .or_else(|| PathUtils::original_extension(source))
        .unwrap_or_default();
    let suffix = format!("_to_{}", base_stem);
    PathUtils::sibling_with_suffix(source, output_dir, &PathUtils::get_stem(source), &suffix, &ext)
}

/// A synthesized ffmpeg invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscodeCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl TranscodeCommand {
    /// Output path, always the last argument
    pub fn output(&self) -> Option<&str> {
        self.args.last().map(String::as_str)
    }

    /// Value following `flag`, if the flag is present
    pub fn arg_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// Single line suitable for pasting into a POSIX shell
    pub fn shell_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(shell_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for TranscodeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.shell_line())
    }
}

/// Quote an argument for a POSIX shell when it needs it
pub fn shell_quote(arg: &str) -> String {
    const SPECIAL: &[char] = &[
        '\'', '"', '\\', '$', '`', ';', '&', '|', '<', '>', '(', ')', '*', '?', '[', ']', '#',
        '~', '!', '{', '}',
    ];
    if !arg.is_empty() && !arg.chars().any(|c| c.is_whitespace() || SPECIAL.contains(&c)) {
        return arg.to_string();
    }
    format!("'{}'", arg.replace('\'', r"'\''"))
}

fn known(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty() && value != NOT_AVAILABLE).then_some(value)
}

/// Synthesize the command converting `source_path` toward `reference`
///
/// Errored records are inert and yield [`DomainError::EntryFailed`].
pub fn synthesize(
    source: &MediaRecord,
    reference: &MediaRecord,
    source_path: &Path,
    output: Option<&Path>,
) -> Result<TranscodeCommand, DomainError> {
    for record in [source, reference] {
        if let Some(error) = &record.error {
            return Err(DomainError::EntryFailed(format!("{}: {}", record.filename, error)));
        }
    }

    let mut args = vec!["-i".to_string(), source_path.to_string_lossy().to_string()];

    let video = reference.video.as_ref();
    let video_codec = video.map(|v| v.codec_name.as_str()).unwrap_or_default();
    args.extend(["-c:v".to_string(), video_encoder(video_codec).to_string()]);

    if let Some(v) = video {
        if let Some((w, h)) = v.resolution() {
            args.extend(["-vf".to_string(), format!("scale={}:{}", w, h)]);
        }
        if let Some(fps) = v.frame_rate {
            args.extend(["-r".to_string(), trim_decimal(fps)]);
        }
        if let Some(bps) = v.bit_rate {
            args.extend(["-b:v".to_string(), bitrate_notation(bps)]);
        }
        if let Some(pix_fmt) = known(&v.pix_fmt) {
            args.extend(["-pix_fmt".to_string(), pix_fmt.to_string()]);
        }
    }

    let audio = reference.audio.as_ref();
    let audio_codec = audio.map(|a| a.codec_name.as_str()).unwrap_or_default();
    args.extend(["-c:a".to_string(), audio_encoder(audio_codec).to_string()]);

    if let Some(a) = audio {
        if let Some(rate) = a.sample_rate {
            args.extend(["-ar".to_string(), rate.to_string()]);
        }
        if a.channels > 0 {
            args.extend(["-ac".to_string(), a.channels.to_string()]);
        }
        if let Some(bps) = a.bit_rate {
            args.extend(["-b:a".to_string(), bitrate_notation(bps)]);
        }
    }

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(source_path));
    args.push(output.to_string_lossy().to_string());

    Ok(TranscodeCommand {
        program: "ffmpeg".to_string(),
        args,
    })
}
