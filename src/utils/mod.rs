//! Common utilities and helpers
//!
//! [`FieldFormatter`] holds the pure conversions between raw probe values and
//! their display strings, plus the inverse parsers the diff engine relies on
//! when a value only exists in display form.

pub mod logging;
pub mod path;
pub mod time;

/// Sentinel shown for values that could not be derived.
pub const UNKNOWN: &str = "unknown";

/// Sentinel shown for values the probe did not report.
pub const NOT_AVAILABLE: &str = "N/A";

const SIZE_UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

/// Display formatting for media fields
pub struct FieldFormatter;

impl FieldFormatter {
    /// Format a byte count using the largest unit that keeps the value below 1024
    pub fn file_size(size: u64) -> String {
        if size == 0 {
            return "0 B".to_string();
        }

        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < SIZE_UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        format!("{:.2} {}", size, SIZE_UNITS[unit_index])
    }

    /// Format seconds as `HH:MM:SS.mmm`, dropping the hour field when it is zero
    pub fn duration(seconds: f64) -> String {
        if !(seconds > 0.0) || !seconds.is_finite() {
            return UNKNOWN.to_string();
        }

        let total_millis = (seconds * 1000.0).round() as u64;
        let hours = total_millis / 3_600_000;
        let minutes = (total_millis % 3_600_000) / 60_000;
        let secs = (total_millis % 60_000) / 1000;
        let millis = total_millis % 1000;

        if hours > 0 {
            format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, millis)
        } else {
            format!("{:02}:{:02}.{:03}", minutes, secs, millis)
        }
    }

    /// Format a raw bits-per-second string; unparseable input is returned unchanged
    pub fn bitrate(raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() || raw == NOT_AVAILABLE {
            return NOT_AVAILABLE.to_string();
        }

        match raw.parse::<u64>() {
            Ok(bps) => Self::bits_per_second(bps),
            Err(_) => raw.to_string(),
        }
    }

    /// Format an exact bits-per-second value
    pub fn bits_per_second(bps: u64) -> String {
        if bps >= 1_000_000 {
            format!("{:.2} Mbps", bps as f64 / 1_000_000.0)
        } else if bps >= 1_000 {
            format!("{:.2} Kbps", bps as f64 / 1_000.0)
        } else {
            format!("{} bps", bps)
        }
    }

    /// Format a frame rate with three decimals
    pub fn frame_rate(fps: Option<f64>) -> String {
        match fps {
            Some(fps) => format!("{:.3}", fps),
            None => UNKNOWN.to_string(),
        }
    }

    /// Parse a `num/den` (or plain decimal) frame rate
    ///
    /// Zero denominators and garbage yield `None`.
    pub fn parse_frame_rate(rate: &str) -> Option<f64> {
        let rate = rate.trim();
        let fps = match rate.split_once('/') {
            Some((num, den)) => {
                let num: f64 = num.trim().parse().ok()?;
                let den: f64 = den.trim().parse().ok()?;
                if den == 0.0 {
                    return None;
                }
                num / den
            }
            None => rate.parse().ok()?,
        };

        if fps.is_finite() && fps > 0.0 {
            Some(fps)
        } else {
            None
        }
    }

    /// Parse a formatted size such as `"1.50 MB"` back to bytes
    pub fn parse_size(text: &str) -> Option<f64> {
        let mut parts = text.split_whitespace();
        let value: f64 = parts.next()?.parse().ok()?;
        let unit = parts.next()?.to_uppercase();
        if parts.next().is_some() {
            return None;
        }

        let exponent = SIZE_UNITS.iter().position(|u| *u == unit)?;
        Some(value * 1024f64.powi(exponent as i32))
    }

    /// Parse a formatted bitrate such as `"5.00 Mbps"` back to bits per second
    pub fn parse_bitrate(text: &str) -> Option<f64> {
        let text = text.trim();
        let (value, multiplier) = if let Some(v) = text.strip_suffix("Mbps") {
            (v, 1_000_000.0)
        } else if let Some(v) = text.strip_suffix("Kbps") {
            (v, 1_000.0)
        } else if let Some(v) = text.strip_suffix("bps") {
            (v, 1.0)
        } else {
            return None;
        };

        value.trim().parse::<f64>().ok().map(|v| v * multiplier)
    }
}
