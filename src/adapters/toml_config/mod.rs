// TOML config adapter - Configuration management using TOML files

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DiffMovieError, DiffMovieResult};
use crate::utils::logging::{LogFormat, LogLevel, LoggingConfig};

/// Prefix shared by every environment override
pub const ENV_PREFIX: &str = "DIFFMOVIE_";

/// Resolved application settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ffprobe_path: PathBuf,
    pub ffmpeg_path: PathBuf,
    pub rasterizer_path: PathBuf,
    pub probe_timeout_secs: u64,
    pub thumbnail_timeout_secs: u64,
    pub render_timeout_secs: u64,
    pub thumbnail_offset_secs: f64,
    pub log_level: LogLevel,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ffprobe_path: PathBuf::from("ffprobe"),
            ffmpeg_path: PathBuf::from("ffmpeg"),
            rasterizer_path: PathBuf::from("wkhtmltoimage"),
            probe_timeout_secs: 30,
            thumbnail_timeout_secs: 10,
            render_timeout_secs: 30,
            thumbnail_offset_secs: 1.0,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
        }
    }
}

impl AppConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn thumbnail_timeout(&self) -> Duration {
        Duration::from_secs(self.thumbnail_timeout_secs)
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level,
            format: self.log_format,
        }
    }

    /// Reject values no run could work with
    pub fn validate(&self) -> DiffMovieResult<()> {
        for (key, secs) in [
            ("probe_timeout_secs", self.probe_timeout_secs),
            ("thumbnail_timeout_secs", self.thumbnail_timeout_secs),
            ("render_timeout_secs", self.render_timeout_secs),
        ] {
            if secs == 0 {
                return Err(DiffMovieError::ConfigError {
                    message: format!("{} must be at least 1", key),
                });
            }
        }
        if !self.thumbnail_offset_secs.is_finite() || self.thumbnail_offset_secs < 0.0 {
            return Err(DiffMovieError::ConfigError {
                message: "thumbnail_offset_secs must be a non-negative number".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    diffmovie: AppConfig,
}

/// Loads [`AppConfig`] from a `[diffmovie]` TOML table and the environment
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn parse(content: &str) -> DiffMovieResult<AppConfig> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.diffmovie)
    }

    /// Read and parse a config file
    pub fn load_file(path: &Path) -> DiffMovieResult<AppConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| DiffMovieError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        let config = Self::parse(&content).map_err(|e| DiffMovieError::ConfigError {
            message: format!("{}: {}", path.display(), e),
        })?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Overlay `DIFFMOVIE_*` variables read through `lookup`
    pub fn apply_env<F>(config: &mut AppConfig, lookup: F) -> DiffMovieResult<usize>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(&format!("{}{}", ENV_PREFIX, key.to_uppercase()));
        let invalid = |key: &str, value: &str, why: &str| DiffMovieError::ConfigError {
            message: format!("{}{}={}: {}", ENV_PREFIX, key.to_uppercase(), value, why),
        };
        let mut applied = 0;

        for (key, slot) in [
            ("ffprobe_path", &mut config.ffprobe_path),
            ("ffmpeg_path", &mut config.ffmpeg_path),
            ("rasterizer_path", &mut config.rasterizer_path),
        ] {
            if let Some(value) = var(key) {
                *slot = PathBuf::from(value);
                applied += 1;
            }
        }

        for (key, slot) in [
            ("probe_timeout_secs", &mut config.probe_timeout_secs),
            ("thumbnail_timeout_secs", &mut config.thumbnail_timeout_secs),
            ("render_timeout_secs", &mut config.render_timeout_secs),
        ] {
            if let Some(value) = var(key) {
                *slot = value
                    .trim()
                    .parse()
                    .map_err(|_| invalid(key, &value, "expected whole seconds"))?;
                applied += 1;
            }
        }

        if let Some(value) = var("thumbnail_offset_secs") {
            config.thumbnail_offset_secs = value
                .trim()
                .parse()
                .map_err(|_| invalid("thumbnail_offset_secs", &value, "expected seconds"))?;
            applied += 1;
        }

        if let Some(value) = var("log_level") {
            config.log_level = value
                .parse()
                .map_err(|e: String| invalid("log_level", &value, &e))?;
            applied += 1;
        }

        if let Some(value) = var("log_format") {
            config.log_format = value
                .parse()
                .map_err(|e: String| invalid("log_format", &value, &e))?;
            applied += 1;
        }

        if applied > 0 {
            debug!("Applied {} environment overrides", applied);
        }
        Ok(applied)
    }
}
