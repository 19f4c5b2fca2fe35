//! DiffMovie video metadata comparison library
//!
//! Extracts canonical metadata from video files through ffprobe, flattens it
//! into labeled display fields, diffs any number of entries against a chosen
//! base and synthesizes ffmpeg commands that convert one file toward another.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod output;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::session::{ComparisonSet, Session};
pub use domain::errors::{DomainError, ExtractionError};
pub use domain::fields::{flatten, FieldKey, FlatFields};
pub use domain::model::{AudioStreamInfo, MediaRecord, VideoStreamInfo};
pub use error::{DiffMovieError, DiffMovieResult};
