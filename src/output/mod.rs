//! Rendering of comparison results for the terminal and for report files

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod report;
pub mod text;
pub mod writer;

/// Output format for structured results on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned human-readable tables
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}
