// Conversion summary - narrates what changes between two records

use serde::Serialize;
use std::fmt;

use crate::domain::model::MediaRecord;
use crate::utils::FieldFormatter;

/// Line emitted when nothing differs
pub const NO_DIFFERENCES: &str = "no differences (identical specification)";

/// Line emitted when either record carries an error
pub const ERRORED_ENTRY: &str = "summary unavailable: one of the entries could not be analyzed";

/// Line emitted for entries without stream data
pub const PRESET_ENTRY: &str = "preset entry: no stream data to summarize";

/// Durations closer than this are treated as equal
const DURATION_TOLERANCE: f64 = 0.1;

const RULE_WIDTH: usize = 50;

/// Ordered difference lines from a source toward a reference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionSummary {
    pub source: String,
    pub reference: String,
    pub lines: Vec<String>,
}

impl ConversionSummary {
    /// Summary holding a single sentinel line
    pub fn sentinel(source: impl Into<String>, reference: impl Into<String>, line: &str) -> Self {
        Self {
            source: source.into(),
            reference: reference.into(),
            lines: vec![line.to_string()],
        }
    }

    pub fn title(&self) -> String {
        format!("Conversion summary: {} → {}", self.source, self.reference)
    }

    /// Whether the summary reports no change
    pub fn is_identical(&self) -> bool {
        self.lines.len() == 1 && self.lines[0] == NO_DIFFERENCES
    }
}

impl fmt::Display for ConversionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{}", rule)?;
        writeln!(f, "{}", self.title())?;
        writeln!(f, "{}", rule)?;
        writeln!(f)?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)?;
        write!(f, "{}", rule)
    }
}

fn ratio(from: f64, to: f64) -> f64 {
    if from > 0.0 {
        to / from
    } else {
        0.0
    }
}

/// Describe how `source` must change to match `reference`
///
/// Video and audio blocks only appear when both records carry that stream.
pub fn summarize(source: &MediaRecord, reference: &MediaRecord) -> ConversionSummary {
    if source.is_error() || reference.is_error() {
        return ConversionSummary::sentinel(&source.filename, &reference.filename, ERRORED_ENTRY);
    }

    let mut lines = Vec::new();

    if source.format_name != reference.format_name {
        lines.push(format!(
            "[container] {} → {}",
            source.format_name, reference.format_name
        ));
    }

    if let (Some(a), Some(b)) = (&source.video, &reference.video) {
        if a.codec_name != b.codec_name {
            lines.push(format!("[video codec] {} → {}", a.codec_name, b.codec_name));
        }

        if (a.width, a.height) != (b.width, b.height) {
            if let (Some((aw, ah)), Some((bw, bh))) = (a.resolution(), b.resolution()) {
                lines.push(format!(
                    "[resolution] {}x{} → {}x{} (width {:.2}×, height {:.2}×)",
                    aw,
                    ah,
                    bw,
                    bh,
                    bw as f64 / aw as f64,
                    bh as f64 / ah as f64
                ));
            }
        }

        if let (Some(fa), Some(fb)) = (a.frame_rate, b.frame_rate) {
            let (la, lb) = (
                FieldFormatter::frame_rate(Some(fa)),
                FieldFormatter::frame_rate(Some(fb)),
            );
            if la != lb {
                lines.push(format!(
                    "[frame rate] {} fps → {} fps ({:.2}×)",
                    la,
                    lb,
                    ratio(fa, fb)
                ));
            }
        }

        if a.bit_rate.is_some() && b.bit_rate.is_some() && a.bit_rate != b.bit_rate {
            lines.push(format!(
                "[video bitrate] {} → {}",
                a.bit_rate_human, b.bit_rate_human
            ));
        }

        if a.pix_fmt != b.pix_fmt {
            lines.push(format!("[pixel format] {} → {}", a.pix_fmt, b.pix_fmt));
        }

        if a.hdr_format != b.hdr_format {
            lines.push(format!("[HDR format] {} → {}", a.hdr_format, b.hdr_format));
        }
    }

    if let (Some(a), Some(b)) = (&source.audio, &reference.audio) {
        if a.codec_name != b.codec_name {
            lines.push(format!("[audio codec] {} → {}", a.codec_name, b.codec_name));
        }

        if a.sample_rate != b.sample_rate {
            lines.push(format!(
                "[sample rate] {} → {}",
                a.sample_rate_label(),
                b.sample_rate_label()
            ));
        }

        if a.channels != b.channels {
            lines.push(format!("[channels] {}ch → {}ch", a.channels, b.channels));
        }

        if a.bit_rate.is_some() && b.bit_rate.is_some() && a.bit_rate != b.bit_rate {
            lines.push(format!(
                "[audio bitrate] {} → {}",
                a.bit_rate_human, b.bit_rate_human
            ));
        }
    }

    if source.file_size > 0 && reference.file_size > 0 && source.file_size != reference.file_size {
        lines.push(format!(
            "[file size] {} → {} ({:.2}×)",
            source.file_size_human,
            reference.file_size_human,
            ratio(source.file_size as f64, reference.file_size as f64)
        ));
    }

    if (source.duration - reference.duration).abs() > DURATION_TOLERANCE {
        lines.push(format!(
            "[duration] {} → {} ({:.2}×)",
            source.duration_human,
            reference.duration_human,
            ratio(source.duration, reference.duration)
        ));
    }

    if lines.is_empty() {
        lines.push(NO_DIFFERENCES.to_string());
    }

    ConversionSummary {
        source: source.filename.clone(),
        reference: reference.filename.clone(),
        lines,
    }
}
