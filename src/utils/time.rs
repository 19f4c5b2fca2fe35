//! Time offset parsing for thumbnail capture

use crate::error::{DiffMovieError, DiffMovieResult};

/// Parser for user-supplied time offsets
pub struct TimeParser;

impl TimeParser {
    /// Create a new time parser
    pub fn new() -> Self {
        Self
    }
}

impl Default for TimeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeParser {
    /// Parse seconds, `MM:SS(.ms)` or `HH:MM:SS(.ms)` into seconds
    pub fn parse_time(&self, time_str: &str) -> DiffMovieResult<f64> {
        let time_str = time_str.trim();
        let invalid = || DiffMovieError::InvalidTimeFormat {
            time: time_str.to_string(),
        };

        let parts: Vec<&str> = time_str.split(':').collect();
        let seconds = match parts.as_slice() {
            [secs] => secs.parse::<f64>().map_err(|_| invalid())?,
            [mins, secs] => {
                let minutes = self.parse_component(mins, f64::INFINITY).ok_or_else(invalid)?;
                let seconds = self.parse_component(secs, 60.0).ok_or_else(invalid)?;
                minutes * 60.0 + seconds
            }
            [hours, mins, secs] => {
                let hours = self.parse_component(hours, f64::INFINITY).ok_or_else(invalid)?;
                let minutes = self.parse_component(mins, 60.0).ok_or_else(invalid)?;
                let seconds = self.parse_component(secs, 60.0).ok_or_else(invalid)?;
                hours * 3600.0 + minutes * 60.0 + seconds
            }
            _ => return Err(invalid()),
        };

        if !seconds.is_finite() || seconds < 0.0 {
            return Err(invalid());
        }

        Ok(seconds)
    }

    fn parse_component(&self, part: &str, limit: f64) -> Option<f64> {
        let value: f64 = part.trim().parse().ok()?;
        (value >= 0.0 && value < limit).then_some(value)
    }
}
