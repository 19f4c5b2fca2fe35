//! Error handling module for DiffMovie

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for DiffMovie operations outside per-file extraction
#[derive(Error, Debug)]
pub enum DiffMovieError {
    /// Invalid time format
    #[error("Invalid time format: {time}. Expected seconds, MM:SS.ms, or HH:MM:SS.ms")]
    InvalidTimeFormat { time: String },

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Comparison rules rejected the request
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Report could not be rendered or written
    #[error("Failed to write report: {message}")]
    ReportError { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for DiffMovie operations
pub type DiffMovieResult<T> = std::result::Result<T, DiffMovieError>;
