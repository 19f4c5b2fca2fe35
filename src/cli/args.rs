//! Command-line argument definitions

use clap::Args;
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Accepts timeouts between one second and one hour
pub fn timeout_secs(s: &str) -> Result<u64, String> {
    clap_num::number_range(s, 1, 3600)
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input video file path
    pub input: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the compare command
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Video files or directories, in column order
    pub inputs: Vec<PathBuf>,

    /// Add a built-in preset as a column (repeatable)
    #[arg(long = "preset", value_name = "NAME")]
    pub presets: Vec<String>,

    /// Zero-based index of the base entry (default: the last one)
    #[arg(long)]
    pub base: Option<usize>,

    /// Only show fields that differ
    #[arg(long)]
    pub only_diff: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print a conversion summary for each entry against the base
    #[arg(long)]
    pub summary: bool,

    /// Print ffmpeg commands converting each file toward the base
    #[arg(long)]
    pub commands: bool,

    /// Directory for suggested output files (default: next to each source)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Descend into subdirectories of directory inputs
    #[arg(short, long)]
    pub recursive: bool,

    /// Write an HTML report (or PNG when the path ends in .png)
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Thumbnail position (seconds, MM:SS.ms or HH:MM:SS.ms)
    #[arg(long, value_name = "TIME")]
    pub thumb_at: Option<String>,
}

/// Arguments for the command command
#[derive(Args, Debug)]
pub struct CommandArgs {
    /// File to convert
    pub source: PathBuf,

    /// File whose settings should be matched
    pub reference: PathBuf,

    /// Output path (default: <source stem>_converted.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the presets command
#[derive(Args, Debug)]
pub struct PresetsArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the shell command
#[derive(Args, Debug)]
pub struct ShellArgs {
    /// Files to load before the first prompt
    pub inputs: Vec<PathBuf>,
}
