//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::adapters::toml_config::{AppConfig, TomlConfigAdapter};
use crate::cli::{Cli, Commands};
use crate::error::{DiffMovieError, DiffMovieResult};
use crate::utils::time::TimeParser;

/// Config file picked up from the working directory when none is named
pub const DEFAULT_CONFIG_FILE: &str = "diffmovie.toml";

/// Resolve configuration with precedence CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(cli: &Cli) -> DiffMovieResult<AppConfig> {
    let env = |key: &str| std::env::var(key).ok();

    // Steps 1 and 2: defaults, then the config file if there is one
    let mut config = match config_file_path(cli.config.as_deref(), &env)? {
        Some(path) => TomlConfigAdapter::load_file(&path)?,
        None => AppConfig::default(),
    };

    // Step 3: environment
    TomlConfigAdapter::apply_env(&mut config, env)?;

    // Step 4: command line
    apply_cli_configuration_overrides(&mut config, cli)?;

    config.validate()?;
    Ok(config)
}

/// Explicit `--config`, then `DIFFMOVIE_CONFIG`, then `./diffmovie.toml` if present
fn config_file_path<F>(explicit: Option<&Path>, env: &F) -> DiffMovieResult<Option<PathBuf>>
where
    F: Fn(&str) -> Option<String>,
{
    let named = explicit
        .map(Path::to_path_buf)
        .or_else(|| env("DIFFMOVIE_CONFIG").map(PathBuf::from));

    if let Some(path) = named {
        if !path.is_file() {
            return Err(DiffMovieError::ConfigError {
                message: format!("config file does not exist: {}", path.display()),
            });
        }
        return Ok(Some(path));
    }

    let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
    Ok(fallback.is_file().then_some(fallback))
}

/// Apply CLI argument overrides to configuration
fn apply_cli_configuration_overrides(config: &mut AppConfig, cli: &Cli) -> DiffMovieResult<()> {
    let mut cli_overrides = 0;

    if let Some(level) = cli.log_level {
        config.log_level = level;
        cli_overrides += 1;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
        cli_overrides += 1;
    }
    if let Some(path) = &cli.ffprobe {
        config.ffprobe_path = path.clone();
        cli_overrides += 1;
    }
    if let Some(path) = &cli.ffmpeg {
        config.ffmpeg_path = path.clone();
        cli_overrides += 1;
    }
    if let Some(secs) = cli.probe_timeout {
        config.probe_timeout_secs = secs;
        cli_overrides += 1;
    }

    if let Commands::Compare(args) = &cli.command {
        if let Some(at) = &args.thumb_at {
            config.thumbnail_offset_secs = TimeParser::new().parse_time(at)?;
            cli_overrides += 1;
        }
    }

    if cli_overrides > 0 {
        debug!("Applied {} CLI configuration overrides", cli_overrides);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_overrides_win() {
        let cli = Cli::parse_from([
            "diffmovie",
            "--ffprobe",
            "/opt/ffprobe",
            "--probe-timeout",
            "7",
            "compare",
            "a.mp4",
            "--thumb-at",
            "00:02.5",
        ]);
        let mut config = AppConfig::default();
        apply_cli_configuration_overrides(&mut config, &cli).unwrap();

        assert_eq!(config.ffprobe_path, PathBuf::from("/opt/ffprobe"));
        assert_eq!(config.probe_timeout_secs, 7);
        assert_eq!(config.thumbnail_offset_secs, 2.5);
    }

    #[test]
    fn test_bad_thumb_offset_is_rejected() {
        let cli = Cli::parse_from(["diffmovie", "compare", "a.mp4", "--thumb-at", "later"]);
        let mut config = AppConfig::default();
        let err = apply_cli_configuration_overrides(&mut config, &cli).unwrap_err();
        assert!(matches!(err, DiffMovieError::InvalidTimeFormat { .. }));
    }

    #[test]
    fn test_named_config_must_exist() {
        let none = |_: &str| None;
        let err = config_file_path(Some(Path::new("/no/such/diffmovie.toml")), &none).unwrap_err();
        assert!(matches!(err, DiffMovieError::ConfigError { .. }));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "").unwrap();
        let from_env = |k: &str| (k == "DIFFMOVIE_CONFIG").then(|| path.display().to_string());
        assert_eq!(config_file_path(None, &from_env).unwrap(), Some(path.clone()));
    }
}
