// Domain errors - Error types for the domain layer

use std::fmt;
use std::time::Duration;

/// Per-file extraction failures.
///
/// These never escape the extractor: they are rendered into the record's
/// `error` string so the rest of a batch keeps going.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionError {
    /// Input path does not exist or is not a regular file
    FileNotFound(String),
    /// Probing tool is not installed or not on PATH
    ToolMissing { tool: String },
    /// Probing tool exited with a non-zero status
    ToolFailed { tool: String, status: Option<i32>, stderr: String },
    /// Probing tool did not finish in time
    Timeout { tool: String, after: Duration },
    /// Tool output could not be decoded
    ParseError(String),
    /// Tool output decoded but lacks a required section
    IncompleteRecord(String),
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionError::FileNotFound(path) => write!(f, "file not found: {}", path),
            ExtractionError::ToolMissing { tool } => {
                write!(f, "{} not found; install ffmpeg to analyze video files", tool)
            }
            ExtractionError::ToolFailed { tool, status, stderr } => {
                match (status, stderr.trim()) {
                    (Some(code), "") => write!(f, "{} failed (exit status {})", tool, code),
                    (Some(code), stderr) => {
                        write!(f, "{} failed (exit status {}): {}", tool, code, stderr)
                    }
                    // no exit code: killed by a signal, or never ran to completion
                    (None, "") => write!(f, "{} was terminated by a signal", tool),
                    (None, stderr) => write!(f, "{} failed: {}", tool, stderr),
                }
            }
            ExtractionError::Timeout { tool, after } => {
                write!(f, "{} timed out after {:?}", tool, after)
            }
            ExtractionError::ParseError(msg) => write!(f, "could not parse probe output: {}", msg),
            ExtractionError::IncompleteRecord(msg) => write!(f, "incomplete probe output: {}", msg),
        }
    }
}

impl std::error::Error for ExtractionError {}

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// Base index outside the comparison set
    InvalidBaseIndex { index: usize, len: usize },
    /// No preset registered under that name
    UnknownPreset(String),
    /// Operation needs stream data the entry does not have
    MissingStreamData(String),
    /// Entry carries an extraction error
    EntryFailed(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::InvalidBaseIndex { index, len } => {
                write!(f, "Base index {} is out of range for {} entries", index, len)
            }
            DomainError::UnknownPreset(name) => write!(f, "Unknown preset: {}", name),
            DomainError::MissingStreamData(msg) => write!(f, "Missing stream data: {}", msg),
            DomainError::EntryFailed(msg) => write!(f, "Entry failed: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
