//! CLI module for DiffMovie
//!
//! This module handles command-line argument parsing and command execution.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::logging::{LogFormat, LogLevel};

pub mod args;
pub mod commands;
pub mod shell;

pub use args::{CommandArgs, CompareArgs, InspectArgs, PresetsArgs, ShellArgs};

/// DiffMovie video metadata comparison
///
/// Probes video files with ffprobe, shows field-by-field differences and
/// suggests ffmpeg settings that would make one file match another.
#[derive(Parser, Debug)]
#[command(name = "diffmovie")]
#[command(about = "DiffMovie - compare video metadata and suggest conversion settings")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Log output format: pretty, compact or json
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    /// Configuration file (default: ./diffmovie.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// ffprobe binary to use
    #[arg(long, global = true)]
    pub ffprobe: Option<PathBuf>,

    /// ffmpeg binary to use for thumbnails
    #[arg(long, global = true)]
    pub ffmpeg: Option<PathBuf>,

    /// Seconds to wait for each probe
    #[arg(long, global = true, value_parser = args::timeout_secs)]
    pub probe_timeout: Option<u64>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the metadata of one video file
    Inspect(InspectArgs),
    /// Compare video files and presets field by field
    Compare(CompareArgs),
    /// Suggest an ffmpeg command converting SOURCE toward REFERENCE
    Command(CommandArgs),
    /// List built-in presets
    Presets(PresetsArgs),
    /// Interactive comparison session
    Shell(ShellArgs),
}
